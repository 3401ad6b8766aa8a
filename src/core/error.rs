use thiserror::Error;

/// Longest body excerpt carried in an error
pub const SNIPPET_CHARS: usize = 200;

/// Failures of a search request.
///
/// A well-formed JSON body with an unexpected layout is not one of these; it
/// is extracted as an empty hit list.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Search failed: HTTP {status} {body}")]
    Protocol { status: u16, body: String },

    #[error("Bad JSON (HTTP {status}): {snippet}")]
    Parse {
        status: u16,
        snippet: String,
        #[source]
        source: serde_json::Error,
    },
}

/// First `SNIPPET_CHARS` characters of a body, marked when cut
pub fn truncate_snippet(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
