//! Profile service model types.
//!
//! This crate holds everything the HTTP layer and the business logic agree
//! on: the [`Profile`] record, typed operation inputs and outputs, the
//! [`ProfileOperation`] enum, the error taxonomy, and the per-request
//! [`RequestContext`]. It performs no I/O.

pub mod context;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use context::RequestContext;
pub use error::{ProfileError, ProfileErrorCode};
pub use operations::ProfileOperation;
pub use output::ProfileOutput;
pub use types::Profile;
