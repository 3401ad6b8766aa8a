//! Facet aggregation
//!
//! Counts are always rebuilt from the full vendor list; there is no
//! incremental update path.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{FacetDimension, Vendor};

/// Facet value -> number of vendors holding it, per dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Facets {
    counts: BTreeMap<FacetDimension, BTreeMap<String, usize>>,
}

impl Facets {
    /// Counts for one dimension, ordered by value
    pub fn dimension(&self, dimension: FacetDimension) -> &BTreeMap<String, usize> {
        // Every dimension is inserted by `aggregate`
        &self.counts[&dimension]
    }

    pub fn count(&self, dimension: FacetDimension, value: &str) -> usize {
        self.dimension(dimension).get(value).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacetDimension, &BTreeMap<String, usize>)> {
        self.counts.iter().map(|(dimension, values)| (*dimension, values))
    }
}

/// Count every vendor into each facet dimension.
///
/// Multi-valued dimensions count a vendor once per value it holds.
pub fn aggregate(vendors: &[Vendor]) -> Facets {
    let mut counts: BTreeMap<FacetDimension, BTreeMap<String, usize>> = FacetDimension::ALL
        .into_iter()
        .map(|dimension| (dimension, BTreeMap::new()))
        .collect();

    for vendor in vendors {
        for (dimension, values) in counts.iter_mut() {
            for value in vendor.facet_values(*dimension) {
                *values.entry(value.to_string()).or_insert(0) += 1;
            }
        }
    }

    Facets { counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::VendorStatus;

    fn typed(id: &str, kind: &str) -> Vendor {
        Vendor {
            kind: Some(kind.to_string()),
            ..Vendor::new(id, format!("Vendor {}", id))
        }
    }

    #[test]
    fn test_type_counts() {
        let vendors = vec![typed("1", "SaaS"), typed("2", "SaaS"), typed("3", "SI")];
        let facets = aggregate(&vendors);

        let expected: BTreeMap<String, usize> =
            [("SaaS".to_string(), 2), ("SI".to_string(), 1)].into_iter().collect();
        assert_eq!(facets.dimension(FacetDimension::Type), &expected);
    }

    #[test]
    fn test_fallback_buckets() {
        let mut listed = Vendor::new("2", "Listed Co");
        listed.listed = true;
        listed.status = Some(VendorStatus::Poc);
        let vendors = vec![Vendor::new("1", "Bare"), listed];
        let facets = aggregate(&vendors);

        assert_eq!(facets.count(FacetDimension::Status, "unknown"), 1);
        assert_eq!(facets.count(FacetDimension::Status, "poc"), 1);
        assert_eq!(facets.count(FacetDimension::Listed, "listed"), 1);
        assert_eq!(facets.count(FacetDimension::Listed, "unlisted"), 1);
        assert_eq!(facets.count(FacetDimension::Type, "other"), 2);
    }

    #[test]
    fn test_multi_valued_counts_every_value() {
        let mut vendor = Vendor::new("1", "Busy");
        vendor.category = vec!["OCR".into(), "CRM".into(), "ERP".into()];
        let mut other = Vendor::new("2", "Quiet");
        other.category = vec!["CRM".into()];
        let facets = aggregate(&[vendor, other]);

        let use_cases = facets.dimension(FacetDimension::UseCases);
        assert_eq!(use_cases.len(), 3);
        assert_eq!(use_cases["CRM"], 2);
        assert_eq!(use_cases["OCR"], 1);
    }

    #[test]
    fn test_empty_collection_has_every_dimension() {
        let facets = aggregate(&[]);
        assert_eq!(facets.iter().count(), FacetDimension::ALL.len());
        assert!(facets.iter().all(|(_, values)| values.is_empty()));
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let vendors = vec![typed("1", "SI"), typed("2", "SaaS"), typed("3", "SI")];
        let mut reversed = vendors.clone();
        reversed.reverse();
        assert_eq!(aggregate(&vendors), aggregate(&reversed));
    }
}
