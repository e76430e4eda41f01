//! Terminal output formatting.

use colored::Colorize;
use std::path::Path;
use swapi_core::importer::ImportSummary;

/// Print what an import run created.
pub fn print_import_summary(summary: &ImportSummary) {
    println!("{} {}", "✓".green().bold(), "SWAPI data loaded successfully.".bold());
    println!();
    println!("  {:<12} {:>6}", "Planets", summary.planets.len().to_string().cyan());
    println!("  {:<12} {:>6}", "Films", summary.films.len().to_string().cyan());
    println!("  {:<12} {:>6}", "Characters", summary.characters.len().to_string().cyan());

    if summary.planets.is_empty() && summary.films.is_empty() && summary.characters.is_empty() {
        println!();
        println!("{}", "Nothing new upstream; the mirror is up to date.".dimmed());
    }
}

/// Print row counts per table.
pub fn print_table_counts(db_path: &Path, counts: &[(&str, i64)]) {
    println!("{} {}", "Database".bold(), db_path.display().to_string().dimmed());
    println!();
    println!("{:<18} {:>8}", "Table", "Rows");
    println!("{}", "─".repeat(27));

    for (table, count) in counts {
        let count = if *count == 0 {
            count.to_string().dimmed()
        } else {
            count.to_string().normal()
        };
        println!("{:<18} {:>8}", table, count);
    }
}

pub fn print_serve_banner(host: &str, port: u16) {
    println!();
    println!("  {} {}", "SWAPI".cyan().bold(), "Mirror API".bold());
    println!();
    println!("  {}       http://{}:{}/api", "API".green(), host, port);
    println!("  {}    http://{}:{}/health", "Health".green(), host, port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();
}
