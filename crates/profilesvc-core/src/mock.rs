//! A [`ProfileService`] whose operations are supplied as closures.
//!
//! Used to drive the HTTP pipeline in tests without a database. Operations
//! left unset fail with an `Internal` error naming the operation.

use async_trait::async_trait;

use profilesvc_model::context::RequestContext;
use profilesvc_model::error::ProfileError;
use profilesvc_model::types::Profile;

use crate::service::ProfileService;

type PostFn = Box<dyn Fn(&RequestContext, Profile) -> Result<Profile, ProfileError> + Send + Sync>;
type GetFn = Box<dyn Fn(&RequestContext, &str) -> Result<Profile, ProfileError> + Send + Sync>;
type DeleteFn = Box<dyn Fn(&RequestContext, &str) -> Result<(), ProfileError> + Send + Sync>;

/// Profile service with substitutable operations.
#[derive(Default)]
pub struct MockProfileService {
    post_profile: Option<PostFn>,
    get_profile: Option<GetFn>,
    delete_profile: Option<DeleteFn>,
}

impl std::fmt::Debug for MockProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProfileService")
            .field("post_profile", &self.post_profile.is_some())
            .field("get_profile", &self.get_profile.is_some())
            .field("delete_profile", &self.delete_profile.is_some())
            .finish()
    }
}

impl MockProfileService {
    /// A mock with no operations configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `post_profile` behavior.
    #[must_use]
    pub fn with_post_profile<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestContext, Profile) -> Result<Profile, ProfileError> + Send + Sync + 'static,
    {
        self.post_profile = Some(Box::new(f));
        self
    }

    /// Set the `get_profile` behavior.
    #[must_use]
    pub fn with_get_profile<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestContext, &str) -> Result<Profile, ProfileError> + Send + Sync + 'static,
    {
        self.get_profile = Some(Box::new(f));
        self
    }

    /// Set the `delete_profile` behavior.
    #[must_use]
    pub fn with_delete_profile<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestContext, &str) -> Result<(), ProfileError> + Send + Sync + 'static,
    {
        self.delete_profile = Some(Box::new(f));
        self
    }
}

fn not_configured(op: &str) -> ProfileError {
    ProfileError::internal_error(format!("mock {op} not configured"))
}

#[async_trait]
impl ProfileService for MockProfileService {
    async fn post_profile(
        &self,
        ctx: &RequestContext,
        profile: Profile,
    ) -> Result<Profile, ProfileError> {
        match &self.post_profile {
            Some(f) => f(ctx, profile),
            None => Err(not_configured("post_profile")),
        }
    }

    async fn get_profile(&self, ctx: &RequestContext, id: &str) -> Result<Profile, ProfileError> {
        match &self.get_profile {
            Some(f) => f(ctx, id),
            None => Err(not_configured("get_profile")),
        }
    }

    async fn delete_profile(&self, ctx: &RequestContext, id: &str) -> Result<(), ProfileError> {
        match &self.delete_profile {
            Some(f) => f(ctx, id),
            None => Err(not_configured("delete_profile")),
        }
    }
}
