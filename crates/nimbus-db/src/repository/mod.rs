//! # Repository Module
//!
//! Database repository implementations for Nimbus POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.users().find_by_email("alice@...")                         │
//! │       ▼                                                                 │
//! │  UserRepository                                                        │
//! │       │  SQL query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place per entity                             │
//! │  • Handlers stay thin                                                  │
//! │  • Repositories are testable against an in-memory pool                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - User rows and the login lookup
//! - [`catalog::CatalogRepository`] - Products, branches, categories, stock
//! - [`sale::SaleRepository`] - Transactional sale recording and history

pub mod catalog;
pub mod sale;
pub mod user;
