//! Database initialization, table definitions and the redb-backed store
//!
//! This module handles the setup of the embedded redb database and implements
//! [`UrlStore`] on top of it. Every call runs on the blocking thread pool,
//! since redb does synchronous file I/O.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::model::{ShortenedUrl, UrlId};
use crate::storage::{Result, UrlStore};

/// Main table for storing URL records
///
/// Key: store-assigned numeric id
/// Value: JSON-serialized ShortenedUrl as string
///
/// Example:
/// - Key: 1
/// - Value: '{"id":1,"target":"https://example.com","created_at":"..."}'
pub const TABLE_URLS: TableDefinition<u64, &str> = TableDefinition::new("urls_v2");

/// Bookkeeping table for id allocation
///
/// Holds a single entry under [`LAST_ID_KEY`]: the highest id ever issued.
/// It only grows, so removed ids are never handed out again.
pub const TABLE_META: TableDefinition<&str, u64> = TableDefinition::new("meta_v1");

pub const LAST_ID_KEY: &str = "last_id";

/// Initializes the embedded database and creates required tables
///
/// # Example
///
/// ```no_run
/// # use shortener::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: impl AsRef<Path>) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_URLS)?;
        write_txn.open_table(TABLE_META)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// [`UrlStore`] persisted in a redb file
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Opens (or creates) the database file at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(init_db(db_path)?))
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db)).await?
    }
}

#[async_trait]
impl UrlStore for RedbStore {
    async fn create(&self, target: String) -> Result<ShortenedUrl> {
        self.blocking(move |db| {
            let write_txn = db.begin_write()?;
            let record = {
                // The id is allocated in the same transaction as the insert,
                // so a failed insert never burns an id.
                let mut meta = write_txn.open_table(TABLE_META)?;
                let last_id = meta.get(LAST_ID_KEY)?.map(|guard| guard.value()).unwrap_or(0);
                let id = last_id + 1;
                meta.insert(LAST_ID_KEY, id)?;

                let record = ShortenedUrl::new(id, target);
                let record_json = serde_json::to_string(&record)?;

                let mut urls = write_txn.open_table(TABLE_URLS)?;
                urls.insert(id, record_json.as_str())?;
                record
            };
            write_txn.commit()?;

            Ok(record)
        })
        .await
    }

    async fn find(&self, id: UrlId) -> Result<Option<ShortenedUrl>> {
        self.blocking(move |db| {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(TABLE_URLS)?;

            match table.get(id)? {
                Some(value) => Ok(Some(serde_json::from_str(value.value())?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn list(&self) -> Result<Vec<ShortenedUrl>> {
        self.blocking(|db| {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(TABLE_URLS)?;

            // Keys are ids, so iteration order is already id order
            table
                .iter()?
                .map(|entry| -> Result<ShortenedUrl> {
                    let (_, value) = entry?;
                    Ok(serde_json::from_str(value.value())?)
                })
                .collect()
        })
        .await
    }

    async fn replace_target(&self, id: UrlId, target: String) -> Result<bool> {
        self.blocking(move |db| {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(TABLE_URLS)?;

                let existing = table.get(id)?.map(|guard| guard.value().to_owned());
                let Some(existing) = existing else {
                    // Dropping the transaction aborts it
                    return Ok(false);
                };

                let mut record: ShortenedUrl = serde_json::from_str(&existing)?;
                record.target = target;
                let record_json = serde_json::to_string(&record)?;
                table.insert(id, record_json.as_str())?;
            }
            write_txn.commit()?;

            Ok(true)
        })
        .await
    }

    async fn remove(&self, id: UrlId) -> Result<bool> {
        self.blocking(move |db| {
            let write_txn = db.begin_write()?;
            let removed = write_txn.open_table(TABLE_URLS)?.remove(id)?.is_some();
            if !removed {
                return Ok(false);
            }
            write_txn.commit()?;

            Ok(true)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_store() -> (RedbStore, NamedTempFile) {
        let temp_db = NamedTempFile::new().expect("Failed to create temp file");
        let store = RedbStore::open(temp_db.path()).expect("Failed to open store");
        (store, temp_db)
    }

    #[tokio::test]
    async fn create_and_find() {
        let (store, _temp_db) = temp_store();

        let created = store.create("https://www.example.com".into()).await.unwrap();
        assert_eq!(created.id, 1);

        let found = store.find(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);

        let found = store.find_readonly(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn find_nonexistent() {
        let (store, _temp_db) = temp_store();

        assert!(store.find(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_records_in_id_order() {
        let (store, _temp_db) = temp_store();
        for i in 1..=3 {
            store.create(format!("https://www.example{i}.com")).await.unwrap();
        }

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].target, "https://www.example1.com");
        assert_eq!(records[2].id, 3);
    }

    #[tokio::test]
    async fn list_empty() {
        let (store, _temp_db) = temp_store();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_target_existing_and_missing() {
        let (store, _temp_db) = temp_store();
        let created = store.create("https://www.example.com".into()).await.unwrap();

        assert!(store
            .replace_target(created.id, "https://www.updated.com".into())
            .await
            .unwrap());
        let found = store.find(created.id).await.unwrap().unwrap();
        assert_eq!(found.target, "https://www.updated.com");
        assert_eq!(found.created_at, created.created_at);

        assert!(!store
            .replace_target(999, "https://www.updated.com".into())
            .await
            .unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_existing_and_missing() {
        let (store, _temp_db) = temp_store();
        let created = store.create("https://www.example.com".into()).await.unwrap();

        assert!(store.remove(created.id).await.unwrap());
        assert!(store.find(created.id).await.unwrap().is_none());
        assert!(!store.remove(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn ids_survive_reopen_and_are_never_reused() {
        let temp_db = NamedTempFile::new().unwrap();

        {
            let store = RedbStore::open(temp_db.path()).unwrap();
            store.create("https://a.example".into()).await.unwrap();
            let second = store.create("https://b.example".into()).await.unwrap();
            store.remove(second.id).await.unwrap();
        }

        let store = RedbStore::open(temp_db.path()).unwrap();
        let third = store.create("https://c.example".into()).await.unwrap();
        assert_eq!(third.id, 3);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }
}
