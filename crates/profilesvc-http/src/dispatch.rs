//! Profile handler trait and operation dispatch.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use profilesvc_model::context::RequestContext;
use profilesvc_model::error::ProfileError;
use profilesvc_model::input::{DeleteProfileInput, GetProfileInput, PostProfileInput};
use profilesvc_model::operations::ProfileOperation;
use profilesvc_model::output::{DeleteProfileOutput, GetProfileOutput, PostProfileOutput};

use crate::body::ProfileResponseBody;
use crate::codec;
use crate::router::RoutingContext;

/// Boxed future returned by [`ProfileHandler`] methods.
pub type HandlerFuture<T> = Pin<Box<dyn Future<Output = Result<T, ProfileError>> + Send>>;

/// Trait that the profile business logic must implement.
///
/// Each method receives a decoded input and returns a typed output. Business
/// and storage failures belong in the output's embedded error; an `Err` means
/// the operation could not be dispatched at all and is rendered as 503.
pub trait ProfileHandler: Send + Sync + 'static {
    /// Handle `POST /profile`.
    fn post_profile(
        &self,
        ctx: RequestContext,
        input: PostProfileInput,
    ) -> HandlerFuture<PostProfileOutput>;

    /// Handle `GET /profile/{id}`.
    fn get_profile(
        &self,
        ctx: RequestContext,
        input: GetProfileInput,
    ) -> HandlerFuture<GetProfileOutput>;

    /// Handle `DELETE /profile/{id}`.
    fn delete_profile(
        &self,
        ctx: RequestContext,
        input: DeleteProfileInput,
    ) -> HandlerFuture<DeleteProfileOutput>;
}

/// Decode, invoke, and encode one routed request.
///
/// # Errors
///
/// Decode errors, dispatch errors from the handler, and encode errors are
/// returned for the caller to render.
pub async fn dispatch_operation<H: ProfileHandler>(
    handler: &H,
    ctx: RequestContext,
    route: RoutingContext,
    body: Bytes,
) -> Result<http::Response<ProfileResponseBody>, ProfileError> {
    let request_id = ctx.request_id().to_owned();
    tracing::debug!(operation = %route.operation, request_id, "dispatching profile operation");

    match route.operation {
        ProfileOperation::PostProfile => {
            let input = codec::decode_post_profile(&body)?;
            let output = handler.post_profile(ctx, input).await?;
            codec::encode_response(&output, &request_id)
        }
        ProfileOperation::GetProfile => {
            let input = codec::decode_get_profile(&route.params)?;
            let output = handler.get_profile(ctx, input).await?;
            codec::encode_response(&output, &request_id)
        }
        ProfileOperation::DeleteProfile => {
            let input = codec::decode_delete_profile(&route.params)?;
            let output = handler.delete_profile(ctx, input).await?;
            codec::encode_response(&output, &request_id)
        }
    }
}

/// Handler that refuses every operation.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl NotImplementedHandler {
    fn refuse<T: Send + 'static>(op: ProfileOperation) -> HandlerFuture<T> {
        Box::pin(async move {
            Err(ProfileError::dispatch_failed(format!(
                "operation not implemented: {op}"
            )))
        })
    }
}

impl ProfileHandler for NotImplementedHandler {
    fn post_profile(
        &self,
        _ctx: RequestContext,
        _input: PostProfileInput,
    ) -> HandlerFuture<PostProfileOutput> {
        Self::refuse(ProfileOperation::PostProfile)
    }

    fn get_profile(
        &self,
        _ctx: RequestContext,
        _input: GetProfileInput,
    ) -> HandlerFuture<GetProfileOutput> {
        Self::refuse(ProfileOperation::GetProfile)
    }

    fn delete_profile(
        &self,
        _ctx: RequestContext,
        _input: DeleteProfileInput,
    ) -> HandlerFuture<DeleteProfileOutput> {
        Self::refuse(ProfileOperation::DeleteProfile)
    }
}
