//! Profile HTTP response body type.

use bytes::Bytes;
use http_body_util::Full;

/// Response body for profile HTTP responses.
///
/// Every response, success or error, is a fully buffered JSON document.
pub type ProfileResponseBody = Full<Bytes>;

/// Build a response body from serialized JSON.
#[must_use]
pub fn json_body(json: Vec<u8>) -> ProfileResponseBody {
    Full::new(Bytes::from(json))
}
