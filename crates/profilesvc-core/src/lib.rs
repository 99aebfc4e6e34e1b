//! Profile service business logic.
//!
//! - [`service::ProfileService`]: the three-operation domain interface
//! - [`storage::RedbProfileService`]: the durable implementation over redb
//! - [`mock::MockProfileService`]: a test double with substitutable operations
//! - [`handler::ProfileEndpoints`]: bridges the HTTP handler trait to a service
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handler;
pub mod mock;
pub mod service;
pub mod storage;

pub use config::ProfileConfig;
pub use handler::ProfileEndpoints;
pub use mock::MockProfileService;
pub use service::ProfileService;
pub use storage::RedbProfileService;
