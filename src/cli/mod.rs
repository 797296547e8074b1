//! CLI module — Clap argument parser, logging setup, output helpers, and
//! command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Backend, Settings};
use crate::errors::Result;

/// nt-export: dump a Next Terminal database into one JSON backup.
#[derive(Parser)]
#[command(
    name = "nt-export",
    about = "Export a Next Terminal database into a single JSON backup",
    version
)]
pub struct Cli {
    /// Config file selecting the database. TOML, not the gateway's
    /// config.yml: copy its `db`, `[sqlite]` and `[mysql]` keys over.
    #[arg(short, long, default_value = "config.toml", env = "NT_EXPORT_CONFIG")]
    pub config: PathBuf,

    /// Where to write the backup
    #[arg(short, long, default_value = "backup.json")]
    pub output: PathBuf,

    /// SQLite database file (skips the config file)
    #[arg(long)]
    pub db_file: Option<PathBuf>,

    /// Log debug detail (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Set up `env_logger`, honouring `RUST_LOG` when present.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .format_timestamp_secs()
    .try_init();
}

/// Work out which database to read from the CLI arguments.
///
/// `--db-file` wins; otherwise the config file must exist and name a
/// supported backend.
pub fn resolve_backend(cli: &Cli) -> Result<Backend> {
    if let Some(path) = &cli.db_file {
        return Ok(Backend::Sqlite(path.clone()));
    }

    log::info!("reading config {}", cli.config.display());
    let settings = Settings::load(&cli.config)?;
    settings.backend()
}
