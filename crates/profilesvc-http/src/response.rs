//! Response formatting and error rendering.

use profilesvc_model::error::ProfileError;
use tracing::{error, warn};

use crate::body::{ProfileResponseBody, json_body};

/// Content type for every profile response.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Serialize an error into the JSON envelope.
///
/// ```json
/// {"error": "not found"}
/// ```
///
/// Only the message is rendered; source chains stay server-side.
#[must_use]
pub fn error_to_json(error: &ProfileError) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "error": error.message,
    }))
    .expect("JSON serialization of error cannot fail")
}

/// Convert a `ProfileError` into a complete HTTP error response.
///
/// The status code comes from the error's code. Server-side failures are
/// logged at `error`, client-side ones at `warn`.
#[must_use]
pub fn error_to_response(error: &ProfileError, request_id: &str) -> http::Response<ProfileResponseBody> {
    if error.status_code.is_server_error() {
        error!(
            request_id,
            code = %error.code,
            status = error.status_code.as_u16(),
            source = ?error.source,
            "{}",
            error.message,
        );
    } else {
        warn!(
            request_id,
            code = %error.code,
            status = error.status_code.as_u16(),
            "{}",
            error.message,
        );
    }

    http::Response::builder()
        .status(error.status_code)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .header(REQUEST_ID_HEADER, request_id)
        .body(json_body(error_to_json(error)))
        .expect("valid error response")
}

/// Build a 200 response from JSON bytes.
#[must_use]
pub fn json_response(json: Vec<u8>, request_id: &str) -> http::Response<ProfileResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .header(REQUEST_ID_HEADER, request_id)
        .body(json_body(json))
        .expect("valid JSON response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: http::Response<ProfileResponseBody>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_should_format_error_json() {
        let json = error_to_json(&ProfileError::invalid_request_body());
        assert_eq!(json, br#"{"error":"invalid request body"}"#);
    }

    #[test]
    fn test_should_not_render_error_source() {
        let err = ProfileError::storage("storage failure")
            .with_source(std::io::Error::other("/var/lib/secret.redb is corrupt"));
        let parsed: serde_json::Value = serde_json::from_slice(&error_to_json(&err)).unwrap();
        assert_eq!(parsed, serde_json::json!({"error": "storage failure"}));
    }

    #[tokio::test]
    async fn test_should_build_error_response_with_correct_status() {
        let resp = error_to_response(&ProfileError::not_found(), "req-123");
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("content-type").unwrap(), CONTENT_TYPE);
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-123");
        assert_eq!(body_string(resp).await, r#"{"error":"not found"}"#);
    }

    #[tokio::test]
    async fn test_should_build_json_success_response() {
        let resp = json_response(b"{}".to_vec(), "req-456");
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(resp.headers().get("content-type").unwrap(), CONTENT_TYPE);
        assert_eq!(body_string(resp).await, "{}");
    }
}
