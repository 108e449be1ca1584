//! # Database Seeder
//!
//! Loads a snapshot export into a SQLite database, so a simulation-mode
//! data dump can become a real server database.
//!
//! ## Usage
//! ```bash
//! # Seed the demo dataset
//! cargo run -p nimbus-db --bin seed
//!
//! # Seed from an exported snapshot file
//! cargo run -p nimbus-db --bin seed -- --from ./nimbus_database.json
//!
//! # Specify database path
//! cargo run -p nimbus-db --bin seed -- --db ./data/nimbus.db
//! ```

use std::env;
use std::fs;

use nimbus_core::Snapshot;
use nimbus_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut db_path = "./nimbus_dev.db".to_string();
    let mut export_path: Option<String> = None;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                i += 1;
                db_path = args
                    .get(i)
                    .ok_or("--db requires a path argument")?
                    .clone();
            }
            "-f" | "--from" => {
                i += 1;
                export_path = Some(
                    args.get(i)
                        .ok_or("--from requires a path argument")?
                        .clone(),
                );
            }
            "-h" | "--help" => {
                println!("Nimbus POS Database Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --from <PATH>  Snapshot export to load (default: built-in demo data)");
                println!("  -d, --db <PATH>    Database file path (default: ./nimbus_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => return Err(format!("Unknown argument: {other}").into()),
        }
        i += 1;
    }

    let snapshot = match &export_path {
        Some(path) => {
            println!("Loading snapshot export from {path}");
            Snapshot::from_json(&fs::read_to_string(path)?)?
        }
        None => {
            println!("No export given, using the built-in demo dataset");
            Snapshot::seed()
        }
    };

    println!("Connecting to {db_path}");
    let db = Database::new(DbConfig::new(&db_path)).await?;

    db.seed_snapshot(&snapshot).await?;

    println!(
        "Seeded {} branches, {} users, {} categories, {} products, {} stock rows, {} sales",
        snapshot.branches.len(),
        snapshot.users.len(),
        snapshot.categories.len(),
        snapshot.products.len(),
        snapshot.stock.len(),
        snapshot.sales.len(),
    );

    db.close().await;
    Ok(())
}
