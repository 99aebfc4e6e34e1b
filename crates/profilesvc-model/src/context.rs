//! Per-request context passed to every service operation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Request-scoped context: a request id and a cancellation flag.
///
/// Cancellation is advisory. Store transactions cannot be interrupted once
/// started, so the flag is only consulted before an operation is dispatched.
/// Clones share the same flag.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    cancelled: Arc<AtomicBool>,
}

impl RequestContext {
    /// Create a context with a fresh UUID v4 request id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(uuid::Uuid::new_v4().to_string())
    }

    /// Create a context with the given request id.
    #[must_use]
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A context with a fresh request id that shares this context's
    /// cancellation flag. Cancelling either one cancels both.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// The request id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Mark the request as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) has been called on this context or a clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
