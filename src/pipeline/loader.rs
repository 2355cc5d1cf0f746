//! Batch loading of a source directory, one transaction per file.

use super::discovery::discover_files;
use super::error::{DiscoveryError, LoadError, ParseError};
use super::{activity_log, song_catalog};
use crate::warehouse::WarehouseStatements;
use rusqlite::Connection;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Which transformer the files of a batch go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    SongCatalog,
    ActivityLog,
}

impl SourceKind {
    fn load(
        self,
        conn: &Connection,
        statements: &WarehouseStatements,
        content: &str,
    ) -> Result<(), LoadError> {
        match self {
            SourceKind::SongCatalog => song_catalog::load(conn, statements, content),
            SourceKind::ActivityLog => activity_log::load(conn, statements, content),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::SongCatalog => write!(f, "song catalog"),
            SourceKind::ActivityLog => write!(f, "activity log"),
        }
    }
}

/// How a batch ended.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Every file was committed.
    Completed { files: usize },
    /// Files before `index` were committed, file `index` (1-based) was rolled
    /// back, and the files after it were never opened.
    Aborted {
        index: usize,
        total: usize,
        path: PathBuf,
        error: LoadError,
    },
}

impl LoadOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, LoadOutcome::Completed { .. })
    }

    /// Process completion signal: 0 when completed, 1 when aborted.
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadOutcome::Completed { .. } => 0,
            LoadOutcome::Aborted { .. } => 1,
        }
    }
}

pub struct BatchLoader {
    statements: WarehouseStatements,
}

impl BatchLoader {
    pub fn new(statements: WarehouseStatements) -> Self {
        BatchLoader { statements }
    }

    /// Loads every file under `root` in discovery order and stops at the
    /// first file that fails.
    ///
    /// Only discovery problems are returned as `Err`; they happen before any
    /// transaction is opened. Per-file failures end up in
    /// [`LoadOutcome::Aborted`].
    pub fn run(
        &self,
        conn: &mut Connection,
        root: &Path,
        extension: &str,
        kind: SourceKind,
    ) -> Result<LoadOutcome, DiscoveryError> {
        let files = discover_files(root, extension)?;
        let total = files.len();
        info!("{} files found in {}", total, root.display());

        for (position, path) in files.into_iter().enumerate() {
            let index = position + 1;
            if let Err(error) = self.load_file(conn, &path, kind) {
                error!(
                    "Failed to load {} file {}: {}",
                    kind,
                    path.display(),
                    error
                );
                return Ok(LoadOutcome::Aborted {
                    index,
                    total,
                    path,
                    error,
                });
            }
            info!("{}/{} files processed.", index, total);
        }

        Ok(LoadOutcome::Completed { files: total })
    }

    fn load_file(
        &self,
        conn: &mut Connection,
        path: &Path,
        kind: SourceKind,
    ) -> Result<(), LoadError> {
        debug!("Loading {}", path.display());
        let tx = conn.transaction()?;

        let result = fs::read(path)
            .map_err(LoadError::from)
            .and_then(|bytes| String::from_utf8(bytes).map_err(|e| ParseError::from(e).into()))
            .and_then(|content| kind.load(&tx, &self.statements, &content));

        match result {
            Ok(()) => {
                tx.commit()?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback() {
                    warn!(
                        "Rollback of {} failed: {}",
                        path.display(),
                        rollback_error
                    );
                }
                Err(e)
            }
        }
    }
}
