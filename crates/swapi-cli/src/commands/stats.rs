//! Row count report.

use anyhow::Result;
use swapi_core::config::Settings;
use swapi_db::queries;

use crate::output;

pub fn execute(settings: &Settings) -> Result<()> {
    let pool = swapi_db::init_pool(&settings.database_path)?;
    let counts = pool.with_conn(queries::table_counts)?;

    output::print_table_counts(&settings.database_path, &counts);
    Ok(())
}
