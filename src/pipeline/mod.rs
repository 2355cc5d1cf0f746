//! Transform-and-load pipeline from raw documents to the warehouse.

pub mod activity_log;
mod discovery;
mod error;
mod loader;
mod resolver;
pub mod song_catalog;

pub use discovery::discover_files;
pub use error::{DiscoveryError, LoadError, ParseError};
pub use loader::{BatchLoader, LoadOutcome, SourceKind};
pub use resolver::SongplayResolver;
