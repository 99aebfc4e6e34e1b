//! Profile service HTTP layer.
//!
//! This crate exposes a [`ProfileHandler`] over HTTP/JSON:
//!
//! - **Router**: maps method + path to a [`ProfileOperation`](profilesvc_model::ProfileOperation)
//! - **Codec**: decodes request bodies and path captures into typed inputs,
//!   encodes typed outputs (or their embedded errors) into responses
//! - **Handler trait**: the boundary between HTTP and business logic
//! - **Service**: hyper `Service` implementation tying the pipeline together

pub mod body;
pub mod codec;
pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use body::ProfileResponseBody;
pub use dispatch::{HandlerFuture, NotImplementedHandler, ProfileHandler};
pub use service::{ProfileHttpConfig, ProfileHttpService};
