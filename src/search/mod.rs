//! Search result types
//!
//! Hits as extracted from a backend response, and the scored view handed to
//! the display layer.

pub mod extract;
pub mod normalize;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One document returned by the search backend for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Hit {
    pub id: String,
    pub title: String,
    /// Raw relevance score, range depends on the backend
    pub score: f64,
    pub snippet: String,
    pub url: Option<String>,
    /// Extra fields the backend sent alongside the hit
    pub metadata: Map<String, Value>,
}

/// A hit with its normalized percentage score.
///
/// Always rebuilt from the current hit list, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult {
    #[serde(flatten)]
    pub hit: Hit,
    /// Normalized score, `0.0..=100.0`
    pub score_pct: f64,
}

/// How raw scores are mapped onto the percentage scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Scores already lie in `[0, 1]` (e.g. cosine similarity), multiplied by 100
    Absolute,
    /// Lowest score in the batch maps to 0, highest to 100
    MinMax,
}

impl fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorePolicy::Absolute => write!(f, "absolute"),
            ScorePolicy::MinMax => write!(f, "min_max"),
        }
    }
}
