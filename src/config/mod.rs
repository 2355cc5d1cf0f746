mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// CLI arguments that can be used for config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub song_data_path: PathBuf,
    pub log_data_path: PathBuf,
    pub file_extension: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data_path: PathBuf,
    pub log_data_path: PathBuf,
    /// Without the leading dot.
    pub file_extension: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified via --db-path or in config file")
            })?;

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let song_data_path = file
            .song_data_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.song_data_path.clone());
        let log_data_path = file
            .log_data_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.log_data_path.clone());
        for data_path in [&song_data_path, &log_data_path] {
            if !data_path.is_dir() {
                bail!("Data directory does not exist: {:?}", data_path);
            }
        }

        let file_extension = file
            .file_extension
            .or_else(|| cli.file_extension.clone())
            .unwrap_or_else(|| DEFAULT_FILE_EXTENSION.to_string());
        let file_extension = file_extension.trim_start_matches('.').to_string();
        if file_extension.is_empty() {
            bail!("file_extension must not be empty");
        }

        Ok(AppConfig {
            db_path,
            song_data_path,
            log_data_path,
            file_extension,
        })
    }
}
