//! Sparkify Warehouse Library
//!
//! Loads the song catalog and the listening activity logs into a star-schema
//! SQLite warehouse.

pub mod config;
pub mod pipeline;
pub mod sqlite_persistence;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use pipeline::{BatchLoader, LoadOutcome, SourceKind};
pub use warehouse::{SqliteWarehouse, WarehouseStatements};
