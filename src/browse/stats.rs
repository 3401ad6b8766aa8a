//! Catalog statistics: totals, per-status and per-category counts, and a
//! completeness check over the fields browsing relies on.

use serde::Serialize;
use std::collections::BTreeMap;

use super::facets::aggregate;
use super::{FacetDimension, Vendor};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    /// Vendors lacking each field
    pub missing: BTreeMap<&'static str, usize>,
    /// Most common categories, highest count first
    pub top_categories: Vec<(String, usize)>,
}

impl CatalogStats {
    pub fn is_complete(&self) -> bool {
        self.missing.values().all(|&count| count == 0)
    }
}

pub fn catalog_stats(vendors: &[Vendor], top_n: usize) -> CatalogStats {
    let facets = aggregate(vendors);
    let by_category = facets.dimension(FacetDimension::UseCases).clone();

    let mut top_categories: Vec<(String, usize)> = by_category
        .iter()
        .map(|(name, count)| (name.clone(), *count))
        .collect();
    // BTreeMap order already breaks ties by name
    top_categories.sort_by(|a, b| b.1.cmp(&a.1));
    top_categories.truncate(top_n);

    let missing = BTreeMap::from([
        ("id", vendors.iter().filter(|v| v.id.trim().is_empty()).count()),
        ("name", vendors.iter().filter(|v| v.name.trim().is_empty()).count()),
        ("category", vendors.iter().filter(|v| v.category.is_empty()).count()),
        ("status", vendors.iter().filter(|v| v.status.is_none()).count()),
    ]);

    CatalogStats {
        total: vendors.len(),
        by_status: facets.dimension(FacetDimension::Status).clone(),
        by_category,
        missing,
        top_categories,
    }
}
