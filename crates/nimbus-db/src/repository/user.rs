//! # User Repository
//!
//! Database operations for users, including the login lookup.
//!
//! ## Login Semantics
//! `find_by_email` is the whole authentication model: an exact, indexed
//! string match. No password hash, no token. The handler turns a miss into
//! a 401.

use sqlx::SqlitePool;
use tracing::debug;

use nimbus_core::{Role, User};

use crate::error::DbResult;

/// Row shape for the users table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: Role,
    branch_id: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            branch_id: row.branch_id,
        }
    }
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Resolves a login email (exact, case-sensitive match).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        debug!(%email, "Looking up user by email");

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, branch_id
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Inserts a user row.
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(user_id = %user.id, email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, role, branch_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .bind(&user.branch_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All users, in insertion order.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, branch_id
            FROM users
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Number of users assigned to a branch.
    ///
    /// The branch-deletion guard: a branch with a non-zero count here must
    /// not be removed.
    pub async fn count_for_branch(&self, branch_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE branch_id = ?1")
                .bind(branch_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use nimbus_core::Snapshot;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.seed_snapshot(&Snapshot::seed()).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_find_by_email_exact_match() {
        let db = seeded_db().await;

        let user = db
            .users()
            .find_by_email("alice@nimbuspos.dev")
            .await
            .unwrap()
            .expect("seeded cashier resolves");
        assert_eq!(user.id, "u3");
        assert_eq!(user.branch_id.as_deref(), Some("b1"));

        assert!(db
            .users()
            .find_by_email("ghost@nimbuspos.dev")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_count_for_branch() {
        let db = seeded_db().await;

        assert_eq!(db.users().count_for_branch("b1").await.unwrap(), 2);
        assert_eq!(db.users().count_for_branch("b2").await.unwrap(), 1);
        assert_eq!(db.users().count_for_branch("b9").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = seeded_db().await;
        let mut dup = db
            .users()
            .find_by_email("alice@nimbuspos.dev")
            .await
            .unwrap()
            .unwrap();
        dup.id = "u9".to_string();

        assert!(db.users().insert(&dup).await.is_err());
    }
}
