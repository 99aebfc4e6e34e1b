//! Profile service error types.
//!
//! Every failure that can reach a client is a [`ProfileError`]. The
//! [`ProfileErrorCode`] decides the HTTP status; the message is what gets
//! rendered into the `{"error": "..."}` envelope.

use std::fmt;

/// Message used for the not-found domain error.
pub const NOT_FOUND_MESSAGE: &str = "not found";

/// Message used for the invalid-request-body domain error.
pub const INVALID_REQUEST_BODY_MESSAGE: &str = "invalid request body";

/// Message used when a matched route lacks its expected capture.
pub const BAD_ROUTING_MESSAGE: &str =
    "inconsistent mapping between route and handler (programmer error)";

/// Error classes understood by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ProfileErrorCode {
    /// No record exists for the requested id.
    NotFound,
    /// The request body does not describe a usable profile.
    InvalidRequestBody,
    /// The request could not be decoded for a reason other than its content.
    DecodeFailed,
    /// The operation could not be dispatched at all.
    DispatchFailed,
    /// A matched route is missing a path capture its decoder requires.
    BadRouting,
    /// The response could not be serialized.
    EncodeFailed,
    /// The embedded store failed.
    Storage,
    /// No route matches the request path.
    RouteNotFound,
    /// The path matches a route, but not under this method.
    MethodNotAllowed,
    /// The request body exceeds the configured limit.
    PayloadTooLarge,
    /// Anything unclassified.
    #[default]
    Internal,
}

impl ProfileErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::InvalidRequestBody => "InvalidRequestBody",
            Self::DecodeFailed => "DecodeFailed",
            Self::DispatchFailed => "DispatchFailed",
            Self::BadRouting => "BadRouting",
            Self::EncodeFailed => "EncodeFailed",
            Self::Storage => "Storage",
            Self::RouteNotFound => "RouteNotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::Internal => "Internal",
        }
    }

    /// Returns the HTTP status code for this error class.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound | Self::RouteNotFound => http::StatusCode::NOT_FOUND,
            Self::InvalidRequestBody | Self::DecodeFailed => http::StatusCode::BAD_REQUEST,
            Self::DispatchFailed => http::StatusCode::SERVICE_UNAVAILABLE,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => http::StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadRouting | Self::EncodeFailed | Self::Storage | Self::Internal => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ProfileErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A profile service error.
#[derive(Debug)]
pub struct ProfileError {
    /// The error class.
    pub code: ProfileErrorCode,
    /// A human-readable error message, rendered to clients as-is.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any. Never rendered to clients.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ProfileError {
    /// Create a new `ProfileError` from an error code.
    #[must_use]
    pub fn new(code: ProfileErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `ProfileError` with a custom message.
    #[must_use]
    pub fn with_message(code: ProfileErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// No record for the requested id.
    #[must_use]
    pub fn not_found() -> Self {
        Self::with_message(ProfileErrorCode::NotFound, NOT_FOUND_MESSAGE)
    }

    /// The request body is malformed or describes an empty profile.
    #[must_use]
    pub fn invalid_request_body() -> Self {
        Self::with_message(
            ProfileErrorCode::InvalidRequestBody,
            INVALID_REQUEST_BODY_MESSAGE,
        )
    }

    /// A matched route has no capture for a parameter its decoder needs.
    #[must_use]
    pub fn bad_routing() -> Self {
        Self::with_message(ProfileErrorCode::BadRouting, BAD_ROUTING_MESSAGE)
    }

    /// Decode-stage failure unrelated to the body's content.
    #[must_use]
    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self::with_message(ProfileErrorCode::DecodeFailed, message)
    }

    /// The operation could not be dispatched.
    #[must_use]
    pub fn dispatch_failed(message: impl Into<String>) -> Self {
        Self::with_message(ProfileErrorCode::DispatchFailed, message)
    }

    /// Response serialization failure.
    #[must_use]
    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self::with_message(ProfileErrorCode::EncodeFailed, message)
    }

    /// Embedded store failure.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::with_message(ProfileErrorCode::Storage, message)
    }

    /// No route for the request path.
    #[must_use]
    pub fn route_not_found(path: &str) -> Self {
        Self::with_message(
            ProfileErrorCode::RouteNotFound,
            format!("no route for path: {path}"),
        )
    }

    /// The request method is not accepted for this path.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method) -> Self {
        Self::with_message(
            ProfileErrorCode::MethodNotAllowed,
            format!("method not allowed: {method}"),
        )
    }

    /// The request body exceeds `limit` bytes.
    #[must_use]
    pub fn payload_too_large(limit: usize) -> Self {
        Self::with_message(
            ProfileErrorCode::PayloadTooLarge,
            format!("request body exceeds {limit} bytes"),
        )
    }

    /// Internal server error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(ProfileErrorCode::Internal, message)
    }
}

/// Create a `ProfileError` from an error code.
///
/// # Examples
///
/// ```
/// use profilesvc_model::profile_error;
/// use profilesvc_model::error::ProfileErrorCode;
///
/// let err = profile_error!(Internal);
/// assert_eq!(err.code, ProfileErrorCode::Internal);
///
/// let err = profile_error!(Storage, "disk full");
/// assert_eq!(err.message, "disk full");
/// ```
#[macro_export]
macro_rules! profile_error {
    ($code:ident) => {
        $crate::error::ProfileError::new($crate::error::ProfileErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::ProfileError::with_message($crate::error::ProfileErrorCode::$code, $msg)
    };
}
