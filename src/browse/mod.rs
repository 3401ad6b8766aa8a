//! Vendor catalog browsing
//!
//! Vendor records, the facet dimensions they are grouped by, and the
//! derived views built over them: facet counts, filtered lists and catalog
//! statistics.

pub mod catalog;
pub mod facets;
pub mod filter;
pub mod stats;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const LISTED_LABEL: &str = "listed";
pub const UNLISTED_LABEL: &str = "unlisted";
pub const OTHER_TYPE: &str = "other";

/// Where a vendor stands in the sales pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum VendorStatus {
    Uncontacted,
    Interviewed,
    NotInterviewed,
    Proposing,
    Poc,
    Contracted,
    OnHold,
    Lost,
    Unknown,
}

impl VendorStatus {
    pub const ALL: [VendorStatus; 9] = [
        VendorStatus::Uncontacted,
        VendorStatus::Interviewed,
        VendorStatus::NotInterviewed,
        VendorStatus::Proposing,
        VendorStatus::Poc,
        VendorStatus::Contracted,
        VendorStatus::OnHold,
        VendorStatus::Lost,
        VendorStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Uncontacted => "uncontacted",
            VendorStatus::Interviewed => "interviewed",
            VendorStatus::NotInterviewed => "not_interviewed",
            VendorStatus::Proposing => "proposing",
            VendorStatus::Poc => "poc",
            VendorStatus::Contracted => "contracted",
            VendorStatus::OnHold => "on_hold",
            VendorStatus::Lost => "lost",
            VendorStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Catalogs are hand-edited; a typo in one status should not reject the file.
impl From<String> for VendorStatus {
    fn from(s: String) -> Self {
        VendorStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .unwrap_or(VendorStatus::Unknown)
    }
}

/// Categorical dimension vendors are counted and filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetDimension {
    Status,
    Listed,
    Type,
    UseCases,
}

impl FacetDimension {
    pub const ALL: [FacetDimension; 4] = [
        FacetDimension::Status,
        FacetDimension::Listed,
        FacetDimension::Type,
        FacetDimension::UseCases,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetDimension::Status => "status",
            FacetDimension::Listed => "listed",
            FacetDimension::Type => "type",
            FacetDimension::UseCases => "use_cases",
        }
    }
}

impl fmt::Display for FacetDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "status" => Ok(FacetDimension::Status),
            "listed" => Ok(FacetDimension::Listed),
            "type" => Ok(FacetDimension::Type),
            "use_cases" | "category" => Ok(FacetDimension::UseCases),
            other => Err(format!(
                "unknown facet '{}', expected one of: status, listed, type, use_cases",
                other
            )),
        }
    }
}

/// A browsable vendor record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawVendor")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub status: Option<VendorStatus>,
    pub listed: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Vec<String>,
    /// Everything else the catalog carries for this vendor
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

/// A vendor record as hand-edited catalogs write it: fields may be absent or
/// `null`, and categories may sit under `category`, `use_cases` or both.
#[derive(Deserialize)]
struct RawVendor {
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default)]
    status: Option<VendorStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    listed: bool,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    category: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    use_cases: Vec<String>,
    #[serde(flatten)]
    meta: Map<String, Value>,
}

impl From<RawVendor> for Vendor {
    fn from(raw: RawVendor) -> Self {
        let mut category = raw.category;
        for use_case in raw.use_cases {
            if !category.contains(&use_case) {
                category.push(use_case);
            }
        }

        Self {
            id: raw.id,
            name: raw.name,
            status: raw.status,
            listed: raw.listed,
            kind: raw.kind,
            category,
            meta: raw.meta,
        }
    }
}

impl Vendor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            listed: false,
            kind: None,
            category: Vec::new(),
            meta: Map::new(),
        }
    }

    pub fn status_or_unknown(&self) -> VendorStatus {
        self.status.unwrap_or(VendorStatus::Unknown)
    }

    pub fn listed_label(&self) -> &'static str {
        if self.listed {
            LISTED_LABEL
        } else {
            UNLISTED_LABEL
        }
    }

    pub fn kind_or_other(&self) -> &str {
        self.kind.as_deref().unwrap_or(OTHER_TYPE)
    }

    /// The values this vendor contributes to a facet dimension.
    ///
    /// Absent fields map to the same fallback buckets the facet counts use,
    /// so every counted bucket can also be filtered on.
    pub fn facet_values(&self, dimension: FacetDimension) -> Vec<&str> {
        match dimension {
            FacetDimension::Status => vec![self.status_or_unknown().as_str()],
            FacetDimension::Listed => vec![self.listed_label()],
            FacetDimension::Type => vec![self.kind_or_other()],
            FacetDimension::UseCases => self.category.iter().map(String::as_str).collect(),
        }
    }

    pub fn has_facet_value(&self, dimension: FacetDimension, value: &str) -> bool {
        self.facet_values(dimension).contains(&value)
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "vendor id must be a string or number, got {}",
            other
        ))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
