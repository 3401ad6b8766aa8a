use anyhow::Result;
use colored::*;
use serde_json::json;
use std::path::PathBuf;
use vendorsearch::browse::catalog::load_catalog;
use vendorsearch::browse::facets::{aggregate, Facets};
use vendorsearch::browse::filter::{filter, FilterState};
use vendorsearch::browse::{FacetDimension, Vendor};
use vendorsearch::core::config::AppConfig;

pub struct BrowseArgs {
    pub catalog: Option<PathBuf>,
    pub text: Option<String>,
    pub drill: Option<(FacetDimension, String)>,
    pub select: Vec<(FacetDimension, String)>,
    pub json: bool,
}

pub fn run(config: &AppConfig, args: BrowseArgs) -> Result<()> {
    let path = config.resolve_catalog(args.catalog)?;
    let vendors = load_catalog(&path)?;

    let mut state = FilterState::new();
    if let Some(text) = args.text {
        state.set_text(text);
    }
    for (dimension, value) in args.select {
        state.toggle(dimension, value, true);
    }
    if let Some((dimension, value)) = args.drill {
        state.drill_down(dimension, value);
    }

    let facets = aggregate(&vendors);
    let visible = filter(&vendors, &state);

    if args.json {
        let out = json!({ "facets": facets, "total": vendors.len(), "vendors": visible });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_facets(&facets);
    println!("{} {}/{}", "Matching:".bold(), visible.len(), vendors.len());
    println!();

    if visible.is_empty() {
        println!("No vendors match the current filters.");
        return Ok(());
    }
    for vendor in &visible {
        print_vendor(vendor);
    }

    Ok(())
}

fn print_facets(facets: &Facets) {
    for (dimension, values) in facets.iter() {
        let line: Vec<String> = values
            .iter()
            .map(|(value, count)| format!("{} ({})", value, count))
            .collect();
        println!("{:<10} {}", dimension.to_string().cyan(), line.join(", "));
    }
    println!();
}

fn print_vendor(vendor: &Vendor) {
    println!(
        "{} {}",
        vendor.name.bold(),
        format!("[{}]", vendor.id).dimmed()
    );
    println!(
        "  {} / {} / {}",
        vendor.status_or_unknown().to_string().magenta(),
        vendor.listed_label(),
        vendor.kind_or_other()
    );
    if !vendor.category.is_empty() {
        println!("  {}", vendor.facet_values(FacetDimension::UseCases).join(", ").dimmed());
    }
}
