//! The profile domain service interface.

use std::sync::Arc;

use async_trait::async_trait;
use profilesvc_model::context::RequestContext;
use profilesvc_model::error::ProfileError;
use profilesvc_model::types::Profile;

/// Create, read, and delete operations on profiles.
///
/// The context is propagated to every call. Implementations backed by
/// non-preemptible transactions are not required to observe cancellation
/// once an operation has started.
#[async_trait]
pub trait ProfileService: Send + Sync + 'static {
    /// Store a new profile and return it with its assigned id.
    ///
    /// Any `id` on the input is ignored.
    async fn post_profile(
        &self,
        ctx: &RequestContext,
        profile: Profile,
    ) -> Result<Profile, ProfileError>;

    /// Fetch a profile by id. Absent ids yield `NotFound`.
    async fn get_profile(&self, ctx: &RequestContext, id: &str) -> Result<Profile, ProfileError>;

    /// Delete a profile by id. Deleting an absent id succeeds.
    async fn delete_profile(&self, ctx: &RequestContext, id: &str) -> Result<(), ProfileError>;
}

#[async_trait]
impl<S: ProfileService + ?Sized> ProfileService for Arc<S> {
    async fn post_profile(
        &self,
        ctx: &RequestContext,
        profile: Profile,
    ) -> Result<Profile, ProfileError> {
        (**self).post_profile(ctx, profile).await
    }

    async fn get_profile(&self, ctx: &RequestContext, id: &str) -> Result<Profile, ProfileError> {
        (**self).get_profile(ctx, id).await
    }

    async fn delete_profile(&self, ctx: &RequestContext, id: &str) -> Result<(), ProfileError> {
        (**self).delete_profile(ctx, id).await
    }
}
