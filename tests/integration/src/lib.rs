//! Integration tests for the profile server.
//!
//! These tests require a running `profilesvc-server` at `localhost:8080`.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p profilesvc-integration -- --ignored
//! ```

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("PROFILESVC_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// Create an HTTP client for talking to the server.
#[must_use]
pub fn client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Full URL for `path` on the server.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", endpoint_url())
}

/// Send a request and return the status with the decoded JSON body.
pub async fn send_json(request: reqwest::RequestBuilder) -> (reqwest::StatusCode, serde_json::Value) {
    let resp = request
        .send()
        .await
        .unwrap_or_else(|e| panic!("request failed: {e}"));
    let status = resp.status();
    tracing::debug!(%status, "received response");
    let body = resp
        .json::<serde_json::Value>()
        .await
        .unwrap_or_else(|e| panic!("response body is not JSON: {e}"));
    (status, body)
}

/// Generate a profile name unique to this test run.
#[must_use]
pub fn test_profile_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Consecutive unassigned ids after which [`find_profile_ids`] gives up.
const MAX_ID_GAP: u64 = 256;

/// Locate the ids of profiles created under `names`.
///
/// The server never reports an id on create, so this walks ids upward from
/// 1 until every name is found. Gaps left by deletes are skipped, up to
/// [`MAX_ID_GAP`] misses in a row.
pub async fn find_profile_ids(
    client: &reqwest::Client,
    names: &[String],
) -> std::collections::HashMap<String, String> {
    let mut found = std::collections::HashMap::new();
    let mut misses = 0;
    let mut id: u64 = 1;

    while found.len() < names.len() {
        assert!(
            misses < MAX_ID_GAP,
            "gave up after id {id}; found {} of {} profiles",
            found.len(),
            names.len()
        );
        let (status, body) = send_json(client.get(url(&format!("/profile/{id}")))).await;
        if status == reqwest::StatusCode::OK {
            misses = 0;
            if let Some(name) = body["profile"]["name"].as_str() {
                if names.iter().any(|n| n == name) {
                    let previous = found.insert(name.to_owned(), id.to_string());
                    assert!(previous.is_none(), "name {name} stored twice");
                }
            }
        } else {
            misses += 1;
        }
        id += 1;
    }
    found
}

mod test_profile;
mod test_routing;
