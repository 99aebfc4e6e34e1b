//! Durable profile storage over an embedded redb database.
//!
//! Profiles live in one named table (the collection), keyed by id, with the
//! JSON-encoded record as value. Ids are minted from a per-collection counter
//! kept in the reserved [`SEQUENCE_TABLE`], advanced inside the same write
//! transaction as the insert. redb serializes write transactions, so two
//! creates can never observe the same counter value.
//!
//! redb calls block, so the [`ProfileService`] implementation runs them on
//! tokio's blocking pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition, TableError, WriteTransaction};
use tracing::{debug, info};

use profilesvc_model::context::RequestContext;
use profilesvc_model::error::ProfileError;
use profilesvc_model::types::Profile;

use crate::error::{StoreError, store_error_to_profile};
use crate::service::ProfileService;

/// Name of the table holding one counter per collection.
pub const SEQUENCE_TABLE: &str = "__sequences";

const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new(SEQUENCE_TABLE);

/// Profile service backed by a redb collection.
#[derive(Clone)]
pub struct RedbProfileService {
    db: Arc<Database>,
    collection: Arc<str>,
}

impl std::fmt::Debug for RedbProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbProfileService")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl RedbProfileService {
    /// Wrap an already-open database.
    ///
    /// The collection must be created with [`ensure_collection`](Self::ensure_collection)
    /// before first use.
    #[must_use]
    pub fn new(db: Arc<Database>, collection: impl Into<Arc<str>>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }

    /// Create or open the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the file cannot be opened, e.g.
    /// because another process holds it.
    pub fn open(path: impl AsRef<Path>, collection: impl Into<Arc<str>>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let db = Database::create(path)?;
        info!(path = %path.display(), "opened profile database");
        Ok(Self::new(Arc::new(db), collection))
    }

    /// The collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Create the collection and sequence tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the transaction fails, or
    /// `ReservedCollection` if the collection name collides with the
    /// sequence table.
    pub fn ensure_collection(&self) -> Result<(), StoreError> {
        if &*self.collection == SEQUENCE_TABLE {
            return Err(StoreError::ReservedCollection(self.collection.to_string()));
        }
        let txn = self.db.begin_write()?;
        txn.open_table(SEQUENCES)?;
        txn.open_table(self.table())?;
        txn.commit()?;
        debug!(collection = %self.collection, "collection ready");
        Ok(())
    }

    /// Persist `profile` under a freshly minted id and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` on transaction or encoding failure. The counter
    /// is only advanced if the transaction commits.
    pub fn create(&self, mut profile: Profile) -> Result<Profile, StoreError> {
        let txn = self.db.begin_write()?;
        let seq = next_sequence(&txn, &self.collection)?;
        profile.id = seq.to_string();

        let buf = serde_json::to_vec(&profile)?;
        {
            let mut table = txn.open_table(self.table())?;
            table.insert(profile.id.as_str(), buf.as_slice())?;
        }
        txn.commit()?;

        debug!(collection = %self.collection, id = %profile.id, "created profile");
        Ok(profile)
    }

    /// Look up a profile. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `MissingCollection` if the table was never created, or another
    /// `StoreError` on transaction or decoding failure.
    pub fn read(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(self.table()) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StoreError::MissingCollection(self.collection.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let Some(guard) = table.get(id)? else {
            return Ok(None);
        };
        let profile = serde_json::from_slice(guard.value())?;
        Ok(Some(profile))
    }

    /// Remove a profile if present. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` on transaction failure.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let txn = self.db.begin_write()?;
        let mut table = txn.open_table(self.table())?;
        let removed = table.remove(id)?.is_some();
        drop(table);
        txn.commit()?;

        debug!(collection = %self.collection, id, removed, "deleted profile");
        Ok(removed)
    }

    fn table(&self) -> TableDefinition<'_, &'static str, &'static [u8]> {
        TableDefinition::new(&self.collection)
    }

    /// Run a store call on the blocking pool.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, ProfileError>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, StoreError> + Send + 'static,
    {
        let this = self.clone();
        tokio::task::spawn_blocking(move || f(&this))
            .await
            .map_err(|e| ProfileError::internal_error(format!("storage task failed: {e}")))?
            .map_err(store_error_to_profile)
    }
}

/// Advance and return the counter for `collection`. The first value is 1.
fn next_sequence(txn: &WriteTransaction, collection: &str) -> Result<u64, StoreError> {
    let mut sequences = txn.open_table(SEQUENCES)?;
    let next = sequences.get(collection)?.map_or(0, |g| g.value()) + 1;
    sequences.insert(collection, next)?;
    Ok(next)
}

#[async_trait]
impl ProfileService for RedbProfileService {
    async fn post_profile(
        &self,
        _ctx: &RequestContext,
        profile: Profile,
    ) -> Result<Profile, ProfileError> {
        if profile.is_empty() {
            return Err(ProfileError::invalid_request_body());
        }
        self.run_blocking(move |store| store.create(profile)).await
    }

    async fn get_profile(&self, _ctx: &RequestContext, id: &str) -> Result<Profile, ProfileError> {
        let id = id.to_owned();
        self.run_blocking(move |store| store.read(&id))
            .await?
            .ok_or_else(ProfileError::not_found)
    }

    async fn delete_profile(&self, _ctx: &RequestContext, id: &str) -> Result<(), ProfileError> {
        let id = id.to_owned();
        self.run_blocking(move |store| store.delete(&id)).await?;
        Ok(())
    }
}
