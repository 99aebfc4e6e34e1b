//! Decoded operation inputs.

use crate::types::Profile;

/// Input for `PostProfile`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProfileInput {
    /// The profile to create; its `id` is ignored.
    pub profile: Profile,
}

/// Input for `GetProfile`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetProfileInput {
    /// The id captured from the request path.
    pub id: String,
}

/// Input for `DeleteProfile`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteProfileInput {
    /// The id captured from the request path.
    pub id: String,
}
