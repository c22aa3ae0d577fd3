//! Storage collaborator interface
//!
//! The resolver never talks to a database directly; it goes through
//! [`UrlStore`], which owns the records and hands out their ids. Two
//! implementations ship with the crate: [`crate::database::RedbStore`]
//! (persistent) and [`crate::memory::InMemoryStore`] (ephemeral).

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ShortenedUrl, UrlId};

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Failures raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    #[error("corrupt record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// redb reports each stage of a transaction with its own error type
macro_rules! impl_from_redb {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for StoreError {
                fn from(err: $err) -> Self {
                    Self::Database(err.into())
                }
            }
        )*
    };
}

impl_from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Stores a new record and returns it with its freshly issued id.
    ///
    /// Ids are unique and strictly increasing for the lifetime of the store;
    /// an id is never handed out twice, even after its record is removed.
    async fn create(&self, target: String) -> Result<ShortenedUrl>;

    /// Looks up a record by id. Returns `None` if it does not exist.
    async fn find(&self, id: UrlId) -> Result<Option<ShortenedUrl>>;

    /// Looks up a record by id without any side effect on the store.
    ///
    /// Used on the redirect path. Backends whose [`UrlStore::find`] locks or
    /// tracks the record must override this.
    async fn find_readonly(&self, id: UrlId) -> Result<Option<ShortenedUrl>> {
        self.find(id).await
    }

    /// Returns every record, ordered by id.
    async fn list(&self) -> Result<Vec<ShortenedUrl>>;

    /// Replaces the target of a record and commits.
    /// Returns `false` if no record has this id.
    async fn replace_target(&self, id: UrlId, target: String) -> Result<bool>;

    /// Removes a record and commits.
    /// Returns `false` if no record has this id.
    async fn remove(&self, id: UrlId) -> Result<bool>;
}
