//! Profile HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;

use profilesvc_model::context::RequestContext;
use profilesvc_model::error::{ProfileError, ProfileErrorCode};

use crate::body::ProfileResponseBody;
use crate::dispatch::{ProfileHandler, dispatch_operation};
use crate::response::{CONTENT_TYPE, REQUEST_ID_HEADER, error_to_response};
use crate::router::{allowed_methods, resolve_route};

/// Default request body limit: 1 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Configuration for the profile HTTP service.
#[derive(Debug, Clone)]
pub struct ProfileHttpConfig {
    /// Largest accepted request body, in bytes.
    pub max_body_size: usize,
}

impl Default for ProfileHttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Hyper `Service` implementation for the profile API.
///
/// Wraps a [`ProfileHandler`] and runs each request through
/// route → collect body → decode → invoke → encode.
///
/// Every request context is a child of one root context held by the
/// service, so [`cancel_in_flight`](Self::cancel_in_flight) reaches all
/// clones.
#[derive(Debug)]
pub struct ProfileHttpService<H: ProfileHandler> {
    handler: Arc<H>,
    config: Arc<ProfileHttpConfig>,
    root: RequestContext,
}

impl<H: ProfileHandler> ProfileHttpService<H> {
    /// Create a new `ProfileHttpService`.
    pub fn new(handler: Arc<H>, config: ProfileHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
            root: RequestContext::new(),
        }
    }

    /// Cancel the context of every request this service (or a clone) has
    /// handed out or will hand out. Requests not yet dispatched are refused.
    pub fn cancel_in_flight(&self) {
        self.root.cancel();
    }

    /// Run one request through the full pipeline.
    ///
    /// Generic over the request body so it can be driven without a socket.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<ProfileResponseBody>
    where
        B: http_body::Body<Data = Bytes> + Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let ctx = self.root.child();
        let request_id = ctx.request_id().to_owned();
        let response = process_request(req, self.handler.as_ref(), &self.config, ctx).await;
        add_common_headers(response, &request_id)
    }
}

impl<H: ProfileHandler> Clone for ProfileHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
            root: self.root.clone(),
        }
    }
}

impl<H: ProfileHandler> hyper::service::Service<http::Request<Incoming>>
    for ProfileHttpService<H>
{
    type Response = http::Response<ProfileResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let svc = self.clone();
        Box::pin(async move { Ok(svc.handle(req).await) })
    }
}

async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    config: &ProfileHttpConfig,
    ctx: RequestContext,
) -> http::Response<ProfileResponseBody>
where
    H: ProfileHandler,
    B: http_body::Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();
    let request_id = ctx.request_id().to_owned();

    // 1. Route on method + path.
    let route = match resolve_route(&parts.method, parts.uri.path()) {
        Ok(route) => route,
        Err(err) => {
            let mut response = error_to_response(&err, &request_id);
            if err.code == ProfileErrorCode::MethodNotAllowed {
                let allow = allowed_methods(parts.uri.path()).join(", ");
                if let Ok(hv) = http::HeaderValue::from_str(&allow) {
                    response.headers_mut().insert(http::header::ALLOW, hv);
                }
            }
            return response;
        }
    };

    // 2. Collect body.
    let body = match collect_body(body, config.max_body_size).await {
        Ok(body) => body,
        Err(err) => return error_to_response(&err, &request_id),
    };

    // 3. Decode, invoke, encode.
    match dispatch_operation(handler, ctx, route, body).await {
        Ok(response) => response,
        Err(err) => error_to_response(&err, &request_id),
    }
}

/// Collect the request body, enforcing `limit`.
async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, ProfileError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ProfileError::payload_too_large(limit))
        }
        Err(e) => Err(ProfileError::decode_failed(format!(
            "failed to read request body: {e}"
        ))),
    }
}

/// Add headers every response carries.
fn add_common_headers(
    mut response: http::Response<ProfileResponseBody>,
    request_id: &str,
) -> http::Response<ProfileResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry(REQUEST_ID_HEADER).or_insert(hv);
    }

    headers
        .entry(http::header::CONTENT_TYPE)
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    headers.insert(
        http::header::SERVER,
        http::HeaderValue::from_static("profilesvc"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::NotImplementedHandler;
    use http_body_util::Full;

    fn service(max_body_size: usize) -> ProfileHttpService<NotImplementedHandler> {
        ProfileHttpService::new(
            Arc::new(NotImplementedHandler),
            ProfileHttpConfig { max_body_size },
        )
    }

    fn request(method: &str, path: &str, body: &'static str) -> http::Request<Full<Bytes>> {
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    #[tokio::test]
    async fn test_should_return_json_404_for_unknown_route() {
        let resp = service(1024).handle(request("GET", "/nope", "")).await;
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("content-type").unwrap(), CONTENT_TYPE);
        assert!(resp.headers().get(REQUEST_ID_HEADER).is_some());
        assert_eq!(resp.headers().get("server").unwrap(), "profilesvc");
    }

    #[tokio::test]
    async fn test_should_return_405_with_allow_header() {
        let resp = service(1024).handle(request("PATCH", "/profile/1", "")).await;
        assert_eq!(resp.status(), http::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers().get("allow").unwrap(), "GET, DELETE");
    }

    #[tokio::test]
    async fn test_should_reject_oversized_body() {
        let resp = service(8)
            .handle(request("POST", "/profile", r#"{"name": "far too long"}"#))
            .await;
        assert_eq!(resp.status(), http::StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_should_share_cancellation_across_clones() {
        let svc = service(1024);
        let clone = svc.clone();
        assert!(!clone.root.is_cancelled());
        svc.cancel_in_flight();
        assert!(clone.root.is_cancelled());
        assert!(clone.root.child().is_cancelled());
    }

    #[tokio::test]
    async fn test_should_render_dispatch_failure_as_503() {
        let resp = service(1024).handle(request("DELETE", "/profile/1", "")).await;
        assert_eq!(resp.status(), http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
