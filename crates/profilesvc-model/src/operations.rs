//! Profile operation enum.

use std::fmt;

/// All supported profile operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileOperation {
    /// Create a profile (`POST /profile`).
    PostProfile,
    /// Read a profile by id (`GET /profile/{id}`).
    GetProfile,
    /// Delete a profile by id (`DELETE /profile/{id}`).
    DeleteProfile,
}

impl ProfileOperation {
    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostProfile => "PostProfile",
            Self::GetProfile => "GetProfile",
            Self::DeleteProfile => "DeleteProfile",
        }
    }
}

impl fmt::Display for ProfileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
