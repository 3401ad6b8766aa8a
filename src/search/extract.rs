//! Response extraction
//!
//! The backend has placed its hit array under several different envelopes.
//! Each known envelope is a [`Shape`]; shapes are tried in order and the first
//! one that locates an array wins. Anything unrecognized degrades to an empty
//! hit list instead of an error.

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use super::Hit;

const ID_KEYS: &[&str] = &["id", "doc_id"];
const TITLE_KEYS: &[&str] = &["title", "text", "name"];
const SCORE_KEYS: &[&str] = &["score"];
const SNIPPET_KEYS: &[&str] = &["snippet", "content"];
const URL_KEYS: &[&str] = &["url", "sourceUrl", "source_url"];

/// Hits and optional envelope metadata pulled out of a raw response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extracted {
    pub hits: Vec<Hit>,
    pub metadata: Option<Map<String, Value>>,
}

/// One accepted response layout
struct Shape {
    name: &'static str,
    locate: fn(&Value) -> Option<&Vec<Value>>,
    metadata: fn(&Value) -> Option<Map<String, Value>>,
}

const SHAPES: &[Shape] = &[
    Shape {
        name: "hits",
        locate: top_level_hits,
        metadata: envelope_metadata,
    },
    Shape {
        name: "results",
        locate: top_level_results,
        metadata: envelope_metadata,
    },
    Shape {
        name: "array",
        locate: bare_array,
        metadata: no_metadata,
    },
    Shape {
        name: "data.hits",
        locate: nested_data_hits,
        metadata: nested_data_metadata,
    },
];

fn top_level_hits(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("hits")?.as_array()
}

fn top_level_results(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("results")?.as_array()
}

fn bare_array(raw: &Value) -> Option<&Vec<Value>> {
    raw.as_array()
}

fn nested_data_hits(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("data")?.get("hits")?.as_array()
}

/// `metadata` object of an envelope, with a sibling `status` folded in
fn envelope_metadata(envelope: &Value) -> Option<Map<String, Value>> {
    let mut metadata = envelope.get("metadata").and_then(Value::as_object).cloned();
    if let Some(status) = envelope.get("status").filter(|s| !s.is_null()) {
        metadata
            .get_or_insert_with(Map::new)
            .entry("status")
            .or_insert_with(|| status.clone());
    }
    metadata
}

fn nested_data_metadata(raw: &Value) -> Option<Map<String, Value>> {
    raw.get("data")
        .and_then(envelope_metadata)
        .or_else(|| envelope_metadata(raw))
}

fn no_metadata(_raw: &Value) -> Option<Map<String, Value>> {
    None
}

/// Locate the hit list in an arbitrary response body.
///
/// Never fails: a body with no recognized layout yields no hits.
pub fn extract(raw: &Value) -> Extracted {
    for shape in SHAPES {
        if let Some(items) = (shape.locate)(raw) {
            debug!("Response matched '{}' shape with {} hits", shape.name, items.len());
            return Extracted {
                hits: items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| to_hit(index, item))
                    .collect(),
                metadata: (shape.metadata)(raw),
            };
        }
    }

    debug!("Response matched no known shape, treating as empty");
    Extracted::default()
}

/// Parse and extract a response body given as text.
///
/// Bodies that are not JSON at all degrade to an empty result, same as an
/// unknown layout.
pub fn extract_str(body: &str) -> Extracted {
    match serde_json::from_str::<Value>(body) {
        Ok(raw) => extract(&raw),
        Err(e) => {
            debug!("Response body is not JSON ({}), treating as empty", e);
            Extracted::default()
        }
    }
}

fn to_hit(index: usize, item: &Value) -> Hit {
    let fallback_id = format!("hit-{}", index);

    let fields = match item {
        Value::Object(fields) => fields,
        Value::String(text) => {
            return Hit {
                id: fallback_id,
                title: text.clone(),
                ..Hit::default()
            }
        }
        _ => {
            return Hit {
                id: fallback_id,
                ..Hit::default()
            }
        }
    };

    let mut rest = fields.clone();
    let id = take_first(&mut rest, ID_KEYS, as_text)
        .filter(|id| !id.is_empty())
        .unwrap_or(fallback_id);
    let title = take_first(&mut rest, TITLE_KEYS, as_text).unwrap_or_default();
    let score = take_first(&mut rest, SCORE_KEYS, as_score).unwrap_or(0.0);
    let snippet = take_first(&mut rest, SNIPPET_KEYS, as_text).unwrap_or_default();
    let url = take_first(&mut rest, URL_KEYS, as_text);

    // Nulls in known slots carry nothing worth keeping
    for key in ID_KEYS
        .iter()
        .chain(TITLE_KEYS)
        .chain(SCORE_KEYS)
        .chain(SNIPPET_KEYS)
        .chain(URL_KEYS)
    {
        if rest.get(*key).is_some_and(Value::is_null) {
            rest.remove(*key);
        }
    }

    Hit {
        id,
        title,
        score,
        snippet,
        url,
        metadata: merge_metadata(rest),
    }
}

/// Remove and convert the first key that holds a usable value.
///
/// Keys whose value does not convert stay in `fields`.
fn take_first<T>(
    fields: &mut Map<String, Value>,
    keys: &[&str],
    convert: fn(&Value) -> Option<T>,
) -> Option<T> {
    for key in keys {
        if let Some(value) = fields.get(*key).and_then(convert) {
            fields.remove(*key);
            return Some(value);
        }
    }
    None
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Nested `metadata` object first, then every leftover field it does not
/// already define.
fn merge_metadata(mut rest: Map<String, Value>) -> Map<String, Value> {
    let mut metadata = match rest.remove("metadata") {
        Some(Value::Object(nested)) => nested,
        Some(other) => {
            rest.insert("metadata".to_string(), other);
            Map::new()
        }
        None => Map::new(),
    };
    for (key, value) in rest {
        metadata.entry(key).or_insert(value);
    }
    metadata
}
