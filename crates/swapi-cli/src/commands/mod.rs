//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swapi_core::config::Settings;

pub mod load;
pub mod migrate;
pub mod serve;
pub mod stats;

/// Local mirror of the Star Wars API
#[derive(Parser)]
#[command(name = "swapi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file (overrides config and SWAPI_DB_PATH)
    #[arg(short, long, global = true, env = "SWAPI_DB_PATH")]
    pub database: Option<PathBuf>,

    /// Config file (defaults to ./swapi.toml when present)
    #[arg(short, long, global = true, env = "SWAPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or upgrade the database schema
    Migrate,

    /// Import planets, films and people from SWAPI
    Load(load::LoadArgs),

    /// Start the API server
    Serve(serve::ServeArgs),

    /// Show row counts per table
    Stats,
}

impl Cli {
    /// Resolve settings: defaults, config file, environment, then flags.
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(path) = &self.database {
            settings.database_path = path.clone();
        }
        Ok(settings)
    }

    pub async fn execute(self) -> Result<()> {
        let settings = self.settings()?;

        match self.command {
            Commands::Migrate => migrate::execute(&settings),
            Commands::Load(args) => load::execute(args, settings).await,
            Commands::Serve(args) => serve::execute(args, settings).await,
            Commands::Stats => stats::execute(&settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["swapi", "stats", "--database", "/tmp/mirror.db"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/mirror.db")));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_load_tls_flags_conflict() {
        assert!(Cli::try_parse_from(["swapi", "load", "--insecure", "--verify-tls"]).is_err());

        let cli = Cli::try_parse_from(["swapi", "load", "--verify-tls", "--timeout", "3"]).unwrap();
        let Commands::Load(args) = cli.command else {
            panic!("expected load");
        };
        assert!(args.verify_tls);
        assert_eq!(args.timeout, Some(3));
    }
}
