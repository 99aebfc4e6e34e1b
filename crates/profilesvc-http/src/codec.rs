//! Request decoding and response encoding.
//!
//! Decoders turn the raw body and path captures into typed inputs. The
//! encoder checks the output for an embedded error before anything is
//! serialized, so the status line and the body always agree.

use profilesvc_model::error::ProfileError;
use profilesvc_model::input::{DeleteProfileInput, GetProfileInput, PostProfileInput};
use profilesvc_model::output::ProfileOutput;
use profilesvc_model::types::Profile;
use tracing::debug;

use crate::body::ProfileResponseBody;
use crate::response::{error_to_response, json_response};
use crate::router::PathParams;

/// Decode a `POST /profile` body.
///
/// # Errors
///
/// Any JSON failure (empty body, syntax error, wrong type, unknown field)
/// yields `InvalidRequestBody`.
pub fn decode_post_profile(body: &[u8]) -> Result<PostProfileInput, ProfileError> {
    match serde_json::from_slice::<Profile>(body) {
        Ok(profile) => Ok(PostProfileInput { profile }),
        Err(e) => {
            debug!(error = %e, "rejecting profile body");
            Err(ProfileError::invalid_request_body().with_source(e))
        }
    }
}

/// Decode a `GET /profile/{id}` request.
///
/// # Errors
///
/// Returns `BadRouting` if the route did not capture `id`.
pub fn decode_get_profile(params: &PathParams) -> Result<GetProfileInput, ProfileError> {
    Ok(GetProfileInput {
        id: require_id(params)?,
    })
}

/// Decode a `DELETE /profile/{id}` request.
///
/// # Errors
///
/// Returns `BadRouting` if the route did not capture `id`.
pub fn decode_delete_profile(params: &PathParams) -> Result<DeleteProfileInput, ProfileError> {
    Ok(DeleteProfileInput {
        id: require_id(params)?,
    })
}

fn require_id(params: &PathParams) -> Result<String, ProfileError> {
    params
        .get("id")
        .map(ToOwned::to_owned)
        .ok_or_else(ProfileError::bad_routing)
}

/// Encode an operation output.
///
/// An output carrying an error is rendered through [`error_to_response`]
/// instead of being serialized.
///
/// # Errors
///
/// Returns `EncodeFailed` if serialization fails.
pub fn encode_response<O: ProfileOutput>(
    output: &O,
    request_id: &str,
) -> Result<http::Response<ProfileResponseBody>, ProfileError> {
    if let Some(err) = output.error() {
        return Ok(error_to_response(err, request_id));
    }
    let json = serde_json::to_vec(output)
        .map_err(|e| ProfileError::encode_failed(format!("failed to serialize response: {e}")))?;
    Ok(json_response(json, request_id))
}
