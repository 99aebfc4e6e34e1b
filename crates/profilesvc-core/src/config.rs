//! Profile service configuration.

use std::env;
use std::path::PathBuf;

use profilesvc_http::service::DEFAULT_MAX_BODY_SIZE;

/// Profile service configuration.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Path of the redb database file.
    pub db_path: PathBuf,
    /// Name of the collection (redb table) holding profiles.
    pub collection: String,
    /// Largest accepted request body, in bytes.
    pub max_body_size: usize,
}

impl ProfileConfig {
    /// Create configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_path: env::var_os("PROFILESVC_DB_PATH").map_or(defaults.db_path, PathBuf::from),
            collection: env::var("PROFILESVC_COLLECTION")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.collection),
            max_body_size: env::var("PROFILESVC_MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_size),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("profiles.redb"),
            collection: "profiles".to_owned(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}
