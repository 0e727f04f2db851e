//! Research fallback: contract for the third-party search API.
//!
//! This module owns everything about a search call except the wire:
//! credentials, the request body, status checking, and normalising the
//! loosely shaped upstream payload. The HTTP POST itself is performed by
//! a caller-supplied `SearchTransport`, so nothing here opens a socket.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";
pub const SEARCH_URL_VAR: &str = "PERPLEXITY_SEARCH_URL";
pub const DEFAULT_SEARCH_URL: &str = "https://api.perplexity.ai/search";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_RESULTS: usize = 6;
/// Characters of an error body kept in `SearchError::Upstream`.
pub const ERROR_PREVIEW_CHARS: usize = 400;
pub const UNTITLED_RESULT: &str = "Untitled result";

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("PERPLEXITY_API_KEY is not configured. Set it to enable the search fallback.")]
    Configuration,

    #[error("Search failed with status {status}: {preview}")]
    Upstream { status: u16, preview: String },

    #[error("Search transport error: {0}")]
    Transport(#[from] anyhow::Error),

    #[error("Search response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Where and how to reach the search API.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub api_key:  Option<String>,
    pub endpoint: String,
    pub timeout:  Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key:  None,
            endpoint: DEFAULT_SEARCH_URL.to_string(),
            timeout:  DEFAULT_TIMEOUT,
        }
    }
}

impl SearchSettings {
    /// Read the credential and endpoint from the environment.
    /// A missing key is not an error here; it surfaces on the first search.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            endpoint: std::env::var(SEARCH_URL_VAR)
                .unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Request headers. Fails without a credential.
    pub fn headers(&self) -> SearchResult<Vec<(String, String)>> {
        let key = self.api_key.as_deref().ok_or(SearchError::Configuration)?;
        Ok(vec![
            ("Authorization".to_string(), format!("Bearer {key}")),
            ("Content-Type".to_string(), "application/json".to_string()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query:        String,
    pub focus_topics: Option<Vec<String>>,
    pub max_results:  usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query:        query.into(),
            focus_topics: None,
            max_results:  DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_focus_topics(mut self, topics: Vec<String>) -> Self {
        self.focus_topics = Some(topics);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Upstream request body. `focus` is omitted when no topics are given.
    pub fn payload(&self) -> Value {
        let mut body = json!({ "query": self.query, "top_k": self.max_results });
        if let Some(topics) = self.focus_topics.as_ref().filter(|t| !t.is_empty()) {
            body["focus"] = json!(topics);
        }
        body
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title:        String,
    pub url:          Option<String>,
    pub snippet:      String,
    pub score:        Option<Value>,
    pub published_at: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query:   String,
    pub answer:  String,
    pub results: Vec<SearchHit>,
    pub usage:   Option<Value>,
}

/// Performs the POST. Returns the status code and raw body.
pub trait SearchTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        timeout: Duration,
    ) -> SearchResult<(u16, String)>;
}

pub struct SearchClient<T: SearchTransport> {
    settings:  SearchSettings,
    transport: T,
}

impl<T: SearchTransport> SearchClient<T> {
    pub fn new(settings: SearchSettings, transport: T) -> Self {
        Self { settings, transport }
    }

    /// Run one search. No retries.
    pub fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        let headers = self.settings.headers()?;

        log::info!("search: query={}", request.query);
        let (status, body) = self.transport.post_json(
            &self.settings.endpoint,
            &headers,
            &request.payload(),
            self.settings.timeout,
        )?;

        check_status(status, &body)?;
        let data: Value = serde_json::from_str(&body)?;
        Ok(normalise_response(&request.query, &data))
    }
}

/// Map an HTTP status of 400 or above to `SearchError::Upstream`.
pub fn check_status(status: u16, body: &str) -> SearchResult<()> {
    if status < 400 {
        return Ok(());
    }
    let preview: String = body.chars().take(ERROR_PREVIEW_CHARS).collect();
    log::error!("search: failed ({status}): {preview}");
    Err(SearchError::Upstream { status, preview })
}

pub fn normalise_response(query: &str, data: &Value) -> SearchResponse {
    let answer = data
        .as_object()
        .and_then(|obj| str_field(obj, &["answer", "summary"]))
        .unwrap_or_default();
    let results = data
        .get("results")
        .and_then(Value::as_array)
        .map(|raw| raw.iter().filter_map(Value::as_object).map(normalise_hit).collect())
        .unwrap_or_default();
    let usage = data.get("usage").filter(|u| !u.is_null()).cloned();

    SearchResponse {
        query: query.to_string(),
        answer,
        results,
        usage,
    }
}

fn normalise_hit(raw: &Map<String, Value>) -> SearchHit {
    SearchHit {
        title:        str_field(raw, &["title", "name"]).unwrap_or_else(|| UNTITLED_RESULT.to_string()),
        url:          str_field(raw, &["url", "source"]),
        snippet:      str_field(raw, &["snippet", "text", "description"]).unwrap_or_default(),
        score:        passthrough(raw, "score"),
        published_at: passthrough(raw, "published_at"),
    }
}

/// Any non-null value under `key`, untouched.
fn passthrough(raw: &Map<String, Value>, key: &str) -> Option<Value> {
    raw.get(key).filter(|v| !v.is_null()).cloned()
}

/// First non-empty string among `keys`.
fn str_field(raw: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| raw.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
