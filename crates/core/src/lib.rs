//! Vitalfolio Core - Domain entities, services, and traits.
//!
//! This crate holds the savings valuation, calorie tracking and spending
//! logic. It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod calories;
pub mod constants;
pub mod errors;
pub mod savings;
pub mod spending;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
