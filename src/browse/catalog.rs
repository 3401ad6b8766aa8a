use anyhow::{bail, Context, Result};
use log::info;
use serde_json::Value;
use std::path::Path;

use super::Vendor;

/// Load a vendor catalog: either a JSON array of vendors or an object with a
/// `vendors` array.
pub fn load_catalog(path: &Path) -> Result<Vec<Vendor>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let vendors = parse_catalog(&raw)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    info!("Loaded {} vendors from {}", vendors.len(), path.display());
    Ok(vendors)
}

pub fn parse_catalog(raw: &str) -> Result<Vec<Vendor>> {
    let records = match serde_json::from_str::<Value>(raw)? {
        Value::Array(records) => records,
        Value::Object(mut root) => match root.remove("vendors") {
            Some(Value::Array(records)) => records,
            _ => bail!("expected a `vendors` array in the catalog object"),
        },
        _ => bail!("expected a JSON array of vendors or an object with a `vendors` array"),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .with_context(|| format!("Invalid vendor record #{}", index))
        })
        .collect()
}
