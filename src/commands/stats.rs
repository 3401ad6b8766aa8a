use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use vendorsearch::browse::catalog::load_catalog;
use vendorsearch::browse::stats::catalog_stats;
use vendorsearch::core::config::AppConfig;

pub fn run(config: &AppConfig, catalog: Option<PathBuf>, top: usize, json: bool) -> Result<()> {
    let path = config.resolve_catalog(catalog)?;
    let vendors = load_catalog(&path)?;
    let stats = catalog_stats(&vendors, top);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} {}", "Vendors:".bold(), stats.total);

    println!("{}", "By status".cyan());
    for (status, count) in &stats.by_status {
        println!("  {:<16} {}", status, count);
    }

    println!("{}", "Top categories".cyan());
    for (category, count) in &stats.top_categories {
        println!("  {:<16} {}", category, count);
    }

    if stats.is_complete() {
        println!("{}", "No missing metadata".green());
    } else {
        println!("{}", "Missing metadata".yellow());
        for (field, count) in stats.missing.iter().filter(|(_, &c)| c > 0) {
            println!("  {:<16} {}", field, count.to_string().red());
        }
    }

    Ok(())
}
