//! Schema migration command.

use anyhow::Result;
use colored::Colorize;
use swapi_core::config::Settings;

pub fn execute(settings: &Settings) -> Result<()> {
    swapi_db::init_pool(&settings.database_path)?;

    println!(
        "{} Database ready at {}",
        "✓".green().bold(),
        settings.database_path.display().to_string().cyan()
    );
    Ok(())
}
