//! SWAPI mirror CLI.
//!
//! Imports the Star Wars API into a local SQLite store and serves it.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "swapi=info,swapi_core=info,swapi_db=info,swapi_web=debug";

/// Initialize tracing with optional file logging.
///
/// The returned guard flushes the file writer on drop and must live until
/// the command finishes.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).with_context(|| format!("creating log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("{} is not a file path", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    // Log to both stdout and file when --log is used
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log.as_deref())?;

    cli.execute().await
}
