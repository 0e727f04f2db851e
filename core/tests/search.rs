//! Search fallback contract, exercised through a recording transport.

use forecast_core::search::{
    check_status, normalise_response, SearchClient, SearchError, SearchRequest, SearchResult,
    SearchSettings, SearchTransport, API_KEY_VAR, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT,
    ERROR_PREVIEW_CHARS, SEARCH_URL_VAR, UNTITLED_RESULT,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::time::Duration;

// ── Test helpers ────────────────────────────────────────────────────────────

struct CannedTransport {
    status: u16,
    body:   String,
    calls:  RefCell<Vec<(String, Value, Duration)>>,
}

impl CannedTransport {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into(), calls: RefCell::new(Vec::new()) }
    }
}

impl SearchTransport for &CannedTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        timeout: Duration,
    ) -> SearchResult<(u16, String)> {
        assert!(headers.iter().any(|(k, v)| k == "Authorization" && v == "Bearer test-key"));
        self.calls.borrow_mut().push((url.to_string(), body.clone(), timeout));
        Ok((self.status, self.body.clone()))
    }
}

fn settings() -> SearchSettings {
    SearchSettings::default().with_api_key("test-key")
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn missing_credential_fails_before_any_call() {
    let transport = CannedTransport::new(200, "{}");
    let client = SearchClient::new(SearchSettings::default(), &transport);

    let err = client.search(&SearchRequest::new("campus recruiting")).unwrap_err();
    assert!(matches!(err, SearchError::Configuration));
    assert!(transport.calls.borrow().is_empty());
}

#[test]
fn request_body_carries_query_top_k_and_focus() {
    let transport = CannedTransport::new(200, r#"{"answer":"ok","results":[]}"#);
    let client = SearchClient::new(settings(), &transport);

    let request = SearchRequest::new("fintech internships")
        .with_focus_topics(vec!["finance".into()])
        .with_max_results(3);
    client.search(&request).unwrap();

    let calls = transport.calls.borrow();
    let (url, body, timeout) = &calls[0];
    assert_eq!(url, "https://api.perplexity.ai/search");
    assert_eq!(*body, json!({"query": "fintech internships", "top_k": 3, "focus": ["finance"]}));
    assert_eq!(*timeout, DEFAULT_TIMEOUT);
}

#[test]
fn focus_is_omitted_without_topics() {
    let body = SearchRequest::new("q").payload();
    assert_eq!(body, json!({"query": "q", "top_k": 6}));
}

#[test]
fn upstream_error_keeps_status_and_truncated_body() {
    let long_body = "x".repeat(1_000);
    let transport = CannedTransport::new(502, long_body);
    let client = SearchClient::new(settings(), &transport);

    match client.search(&SearchRequest::new("q")).unwrap_err() {
        SearchError::Upstream { status, preview } => {
            assert_eq!(status, 502);
            assert_eq!(preview.len(), ERROR_PREVIEW_CHARS);
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
    assert_eq!(transport.calls.borrow().len(), 1, "upstream errors are not retried");
}

#[test]
fn success_statuses_pass_the_check() {
    assert!(check_status(200, "").is_ok());
    assert!(check_status(399, "").is_ok());
    assert!(check_status(400, "bad").is_err());
}

#[test]
fn results_are_normalised_with_fallbacks() {
    let data = json!({
        "summary": "Fallback answer",
        "results": [
            {"title": "A", "url": "https://a.example", "snippet": "first", "score": 0.9,
             "published_at": "2024-01-02"},
            {"name": "B", "source": "https://b.example", "text": "second"},
            {"description": "third"},
            "not an object"
        ],
        "usage": {"tokens": 12}
    });
    let response = normalise_response("q", &data);

    assert_eq!(response.query, "q");
    assert_eq!(response.answer, "Fallback answer");
    assert_eq!(response.results.len(), 3);

    let a = &response.results[0];
    assert_eq!((a.title.as_str(), a.url.as_deref()), ("A", Some("https://a.example")));
    assert_eq!(a.score, Some(json!(0.9)));
    assert_eq!(a.published_at, Some(json!("2024-01-02")));

    let b = &response.results[1];
    assert_eq!((b.title.as_str(), b.snippet.as_str()), ("B", "second"));
    assert_eq!(b.url.as_deref(), Some("https://b.example"));

    let c = &response.results[2];
    assert_eq!(c.title, UNTITLED_RESULT);
    assert_eq!(c.url, None);
    assert_eq!(c.snippet, "third");

    assert_eq!(response.usage, Some(json!({"tokens": 12})));
}

#[test]
fn missing_fields_normalise_to_empty() {
    let response = normalise_response("q", &json!({}));
    assert_eq!(response.answer, "");
    assert!(response.results.is_empty());
    assert_eq!(response.usage, None);
}

#[test]
fn score_and_published_at_pass_through_any_json() {
    let data = json!({
        "results": [
            {"title": "A", "score": "high", "published_at": 1704153600},
            {"title": "B", "score": null}
        ]
    });
    let response = normalise_response("q", &data);

    assert_eq!(response.results[0].score, Some(json!("high")));
    assert_eq!(response.results[0].published_at, Some(json!(1704153600)));
    assert_eq!(response.results[1].score, None);
    assert_eq!(response.results[1].published_at, None);
}

/// The only test in this binary that touches the process environment.
#[test]
fn settings_read_credential_and_endpoint_from_env() {
    std::env::set_var(API_KEY_VAR, "env-key");
    std::env::set_var(SEARCH_URL_VAR, "https://search.internal.example/v1");
    let settings = SearchSettings::from_env();
    assert_eq!(settings.api_key.as_deref(), Some("env-key"));
    assert_eq!(settings.endpoint, "https://search.internal.example/v1");
    assert_eq!(settings.timeout, DEFAULT_TIMEOUT);

    std::env::set_var(API_KEY_VAR, "");
    std::env::remove_var(SEARCH_URL_VAR);
    let settings = SearchSettings::from_env();
    assert_eq!(settings.api_key, None, "an empty key counts as missing");
    assert_eq!(settings.endpoint, DEFAULT_SEARCH_URL);
    assert!(matches!(settings.headers(), Err(SearchError::Configuration)));

    std::env::remove_var(API_KEY_VAR);
    assert_eq!(SearchSettings::from_env().api_key, None);
}
