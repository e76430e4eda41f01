//! SWAPI import command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use swapi_core::config::Settings;
use swapi_core::importer::{self, HttpSource};

use crate::output;

#[derive(Args)]
pub struct LoadArgs {
    /// API root to import from
    #[arg(long, env = "SWAPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "SWAPI_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates from the API
    #[arg(long, conflicts_with = "verify_tls")]
    pub insecure: bool,

    /// Require valid TLS certificates from the API
    #[arg(long)]
    pub verify_tls: bool,
}

impl LoadArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.base_url {
            settings.swapi_base_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout_secs = secs;
        }
        if self.insecure {
            settings.accept_invalid_certs = true;
        }
        if self.verify_tls {
            settings.accept_invalid_certs = false;
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn execute(args: LoadArgs, mut settings: Settings) -> Result<()> {
    args.apply(&mut settings);

    let pool = Arc::new(swapi_db::init_pool(&settings.database_path)?);
    tracing::debug!(
        base_url = %settings.swapi_base_url,
        timeout_secs = settings.request_timeout_secs,
        "Starting import"
    );
    let pb = spinner(&format!("Loading from {}", settings.swapi_base_url));

    // The HTTP client is blocking, so it is built and dropped on the worker thread.
    let result = tokio::task::spawn_blocking(move || {
        let source = HttpSource::from_settings(&settings)?;
        importer::run_import(&pool, &source)
    })
    .await
    .context("import task panicked")?;

    match result {
        Ok(summary) => {
            pb.finish_and_clear();
            output::print_import_summary(&summary);
            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            tracing::error!(error = %e, "swapi load failed");
            eprintln!("{} {}", "✗".red().bold(), "Import failed, nothing was saved.".red());
            Err(e.into())
        }
    }
}
