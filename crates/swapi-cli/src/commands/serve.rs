//! Web server command.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use swapi_core::config::Settings;

use crate::output;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,
}

pub async fn execute(args: ServeArgs, mut settings: Settings) -> Result<()> {
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }

    let pool = Arc::new(swapi_db::init_pool(&settings.database_path)?);

    output::print_serve_banner(&settings.host, settings.port);
    swapi_web::run_server(pool, &settings.host, settings.port).await?;

    Ok(())
}
