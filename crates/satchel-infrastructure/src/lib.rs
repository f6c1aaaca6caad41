//! # Satchel Infrastructure
//!
//! SQLite implementations of the core repository traits (adapters).

pub mod database;

pub use database::{create_pool, SqliteSessionRepository, SqliteUserRepository};
