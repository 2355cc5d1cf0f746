//! Common test infrastructure
//!
//! Builds source document trees on disk and reads back what the loader wrote.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{song_document, TestDataTree, TestWarehouse};
//!
//! #[test]
//! fn test_load_song() {
//!     let tree = TestDataTree::new();
//!     tree.write("A/A/A/TRAAAAW128F429D538.json", &song_document("A1", "N", "S1", "T", 180.0));
//!     let mut warehouse = TestWarehouse::new();
//!     warehouse.load(tree.path(), sparkify_warehouse::SourceKind::SongCatalog);
//! }
//! ```

#![allow(dead_code)]

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::*;
