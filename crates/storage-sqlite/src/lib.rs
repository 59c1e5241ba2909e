//! SQLite storage implementation for Vitalfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `vitalfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - A generic per-user JSON document table and the repositories built on it
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool. Every write is queued on a single writer
//! task that runs it inside an immediate transaction.

pub mod db;
pub mod documents;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod calories;
pub mod savings;
pub mod spending;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use calories::CalorieRepository;
pub use savings::SavingsRepository;
pub use spending::SpendingRepository;

// Re-export from vitalfolio-core for convenience
pub use vitalfolio_core::errors::{DatabaseError, Error, Result};
