use anyhow::{Context, Result};
use clap::Parser;
use sparkify_warehouse::config::{AppConfig, CliConfig, FileConfig};
use sparkify_warehouse::{
    BatchLoader, LoadOutcome, SourceKind, SqliteWarehouse, WarehouseStatements,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "warehouse-etl")]
#[command(about = "Load the Sparkify song catalog and activity logs into the warehouse")]
struct CliArgs {
    /// Path to a TOML config file. Its values override the CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse database file (created if missing).
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Root directory of the song catalog documents.
    #[clap(long, value_parser = parse_path, default_value = "data/song_data")]
    pub song_data: PathBuf,

    /// Root directory of the activity log documents.
    #[clap(long, value_parser = parse_path, default_value = "data/log_data")]
    pub log_data: PathBuf,

    /// Extension of the source documents.
    #[clap(long)]
    pub file_extension: Option<String>,
}

fn run_batch(
    loader: &BatchLoader,
    warehouse: &mut SqliteWarehouse,
    root: &Path,
    extension: &str,
    kind: SourceKind,
) -> Result<LoadOutcome> {
    info!("Loading {} documents from {}...", kind, root.display());
    loader
        .run(warehouse.conn_mut(), root, extension, kind)
        .with_context(|| format!("Failed to discover {} documents", kind))
}

fn main() -> Result<ExitCode> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        db_path: cli_args.db_path,
        song_data_path: cli_args.song_data,
        log_data_path: cli_args.log_data,
        file_extension: cli_args.file_extension,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening warehouse database at {:?}...", config.db_path);
    let mut warehouse = SqliteWarehouse::open(&config.db_path)?;
    let loader = BatchLoader::new(WarehouseStatements::default());

    for (root, kind) in [
        (&config.song_data_path, SourceKind::SongCatalog),
        (&config.log_data_path, SourceKind::ActivityLog),
    ] {
        let outcome = run_batch(&loader, &mut warehouse, root, &config.file_extension, kind)?;
        if let LoadOutcome::Aborted { index, total, .. } = &outcome {
            info!(
                "Aborted {} load at file {}/{}; later files were not loaded",
                kind, index, total
            );
            return Ok(ExitCode::from(outcome.exit_code()));
        }
    }

    let counts = warehouse.table_counts()?;
    println!("Warehouse contains:");
    println!("  {} artists", counts.artists);
    println!("  {} songs", counts.songs);
    println!("  {} users", counts.users);
    println!("  {} time rows", counts.time);
    println!("  {} songplays", counts.songplays);

    Ok(ExitCode::SUCCESS)
}
