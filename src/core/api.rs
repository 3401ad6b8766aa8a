use log::{debug, info, warn};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::core::config::AppConfig;
use crate::core::error::{truncate_snippet, SearchError};
use crate::search::extract::extract;
use crate::search::normalize::{normalize, retain_min_pct};
use crate::search::{ScorePolicy, ViewResult};

pub const MAX_TOP_K: usize = 50;

/// Body of `POST /search`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(rename = "k")]
    pub top_k: usize,
    pub use_mmr: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, config: &AppConfig) -> Self {
        Self {
            query: query.into(),
            top_k: config.top_k,
            use_mmr: config.use_mmr,
        }
    }
}

/// Normalized results of one search, ready to display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub policy: ScorePolicy,
    pub results: Vec<ViewResult>,
    pub metadata: Option<Map<String, Value>>,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "Failed to build HTTP client with a {}s timeout, requests will not time out: {}",
                    config.timeout_secs, e
                );
                Client::new()
            });
        Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Send one search request and return the parsed body as-is.
    ///
    /// No retries; the caller decides whether to try again.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        if request.query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let body = SearchRequest {
            query: request.query.trim().to_string(),
            top_k: request.top_k.clamp(1, MAX_TOP_K),
            use_mmr: request.use_mmr,
        };
        let url = self.search_url();
        debug!("POST {} k={} use_mmr={}", url, body.top_k, body.use_mmr);

        let transport = |source| SearchError::Transport {
            url: url.clone(),
            source,
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(SearchError::Protocol {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| SearchError::Parse {
            status: status.as_u16(),
            snippet: truncate_snippet(&text),
            source,
        })
    }

    /// Search, extract whatever hits the body holds, and score them
    pub async fn search_hits(
        &self,
        request: &SearchRequest,
        policy: ScorePolicy,
        min_score_pct: Option<f64>,
    ) -> Result<SearchOutcome, SearchError> {
        let raw = self.search(request).await?;
        let extracted = extract(&raw);

        let mut results = normalize(&extracted.hits, policy);
        if let Some(min_pct) = min_score_pct {
            results = retain_min_pct(results, min_pct);
        }
        info!(
            "Search '{}' returned {} hits, {} shown ({} scoring)",
            request.query,
            extracted.hits.len(),
            results.len(),
            policy
        );

        Ok(SearchOutcome {
            policy,
            results,
            metadata: extracted.metadata,
        })
    }
}
