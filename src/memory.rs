use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::model::{ShortenedUrl, UrlId};
use crate::storage::{Result, UrlStore};

/// In-memory implementation of [`UrlStore`] backed by a DashMap.
///
/// Ids come from an atomic counter, so concurrent creates never collide.
/// Everything is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<UrlId, ShortenedUrl>,
    last_id: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn create(&self, target: String) -> Result<ShortenedUrl> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = ShortenedUrl::new(id, target);
        self.records.insert(id, record.clone());
        Ok(record)
    }

    async fn find(&self, id: UrlId) -> Result<Option<ShortenedUrl>> {
        Ok(self.records.get(&id).map(|entry| entry.clone()))
    }

    async fn list(&self) -> Result<Vec<ShortenedUrl>> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn replace_target(&self, id: UrlId, target: String) -> Result<bool> {
        let Some(mut entry) = self.records.get_mut(&id) else {
            return Ok(false);
        };
        entry.target = target;
        Ok(true)
    }

    async fn remove(&self, id: UrlId) -> Result<bool> {
        Ok(self.records.remove(&id).is_some())
    }
}
