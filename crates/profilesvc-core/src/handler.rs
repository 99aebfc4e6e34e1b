//! Profile handler bridging the HTTP layer to a [`ProfileService`].

use std::sync::Arc;

use profilesvc_http::dispatch::{HandlerFuture, ProfileHandler};
use profilesvc_model::context::RequestContext;
use profilesvc_model::error::ProfileError;
use profilesvc_model::input::{DeleteProfileInput, GetProfileInput, PostProfileInput};
use profilesvc_model::output::{DeleteProfileOutput, GetProfileOutput, PostProfileOutput};

use crate::service::ProfileService;

/// Per-operation endpoints over a shared service.
///
/// Service failures are embedded in the operation output. A request whose
/// context is already cancelled (see `ProfileHttpService::cancel_in_flight`)
/// is refused before the service is called.
#[derive(Debug)]
pub struct ProfileEndpoints<S> {
    service: Arc<S>,
}

impl<S: ProfileService> ProfileEndpoints<S> {
    /// Create endpoints wrapping a service.
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

fn refuse_cancelled(ctx: &RequestContext) -> Result<(), ProfileError> {
    if ctx.is_cancelled() {
        tracing::debug!(request_id = ctx.request_id(), "request cancelled before dispatch");
        return Err(ProfileError::dispatch_failed("request context cancelled"));
    }
    Ok(())
}

impl<S: ProfileService> ProfileHandler for ProfileEndpoints<S> {
    fn post_profile(
        &self,
        ctx: RequestContext,
        input: PostProfileInput,
    ) -> HandlerFuture<PostProfileOutput> {
        let service = Arc::clone(&self.service);
        Box::pin(async move {
            refuse_cancelled(&ctx)?;
            Ok::<_, ProfileError>(match service.post_profile(&ctx, input.profile).await {
                Ok(_) => PostProfileOutput::default(),
                Err(e) => PostProfileOutput::failed(e),
            })
        })
    }

    fn get_profile(
        &self,
        ctx: RequestContext,
        input: GetProfileInput,
    ) -> HandlerFuture<GetProfileOutput> {
        let service = Arc::clone(&self.service);
        Box::pin(async move {
            refuse_cancelled(&ctx)?;
            Ok::<_, ProfileError>(match service.get_profile(&ctx, &input.id).await {
                Ok(profile) => GetProfileOutput::found(profile),
                Err(e) => GetProfileOutput::failed(e),
            })
        })
    }

    fn delete_profile(
        &self,
        ctx: RequestContext,
        input: DeleteProfileInput,
    ) -> HandlerFuture<DeleteProfileOutput> {
        let service = Arc::clone(&self.service);
        Box::pin(async move {
            refuse_cancelled(&ctx)?;
            Ok::<_, ProfileError>(match service.delete_profile(&ctx, &input.id).await {
                Ok(()) => DeleteProfileOutput::default(),
                Err(e) => DeleteProfileOutput::failed(e),
            })
        })
    }
}
