//! Operation outputs.
//!
//! Each output carries an optional embedded error alongside its payload. The
//! error is never serialized: the HTTP layer checks [`ProfileOutput::error`]
//! before encoding and renders the error envelope instead when one is set.
//! Absent payload fields are omitted, so an acknowledgement encodes as `{}`.

use serde::Serialize;

use crate::error::ProfileError;
use crate::types::Profile;

/// An operation output that may carry a business error.
pub trait ProfileOutput: Serialize + Send {
    /// The embedded error, if the operation failed.
    fn error(&self) -> Option<&ProfileError>;
}

/// Output of `PostProfile`.
#[derive(Debug, Default, Serialize)]
pub struct PostProfileOutput {
    /// Embedded error; never serialized.
    #[serde(skip)]
    pub err: Option<ProfileError>,
}

impl PostProfileOutput {
    /// A failed create.
    #[must_use]
    pub fn failed(err: ProfileError) -> Self {
        Self { err: Some(err) }
    }
}

/// Output of `GetProfile`.
#[derive(Debug, Default, Serialize)]
pub struct GetProfileOutput {
    /// The stored profile, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    /// Embedded error; never serialized.
    #[serde(skip)]
    pub err: Option<ProfileError>,
}

impl GetProfileOutput {
    /// A successful read.
    #[must_use]
    pub fn found(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
            err: None,
        }
    }

    /// A failed read.
    #[must_use]
    pub fn failed(err: ProfileError) -> Self {
        Self {
            profile: None,
            err: Some(err),
        }
    }
}

/// Output of `DeleteProfile`.
#[derive(Debug, Default, Serialize)]
pub struct DeleteProfileOutput {
    /// Embedded error; never serialized.
    #[serde(skip)]
    pub err: Option<ProfileError>,
}

impl DeleteProfileOutput {
    /// A failed delete.
    #[must_use]
    pub fn failed(err: ProfileError) -> Self {
        Self { err: Some(err) }
    }
}

impl ProfileOutput for PostProfileOutput {
    fn error(&self) -> Option<&ProfileError> {
        self.err.as_ref()
    }
}

impl ProfileOutput for GetProfileOutput {
    fn error(&self) -> Option<&ProfileError> {
        self.err.as_ref()
    }
}

impl ProfileOutput for DeleteProfileOutput {
    fn error(&self) -> Option<&ProfileError> {
        self.err.as_ref()
    }
}
