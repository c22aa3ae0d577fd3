//! Translation between stored records and their public short codes
//!
//! A record's public code is the base-62 form of `id + OFFSET`. Shifting
//! every id past [`OFFSET`] keeps codes of early records multi-character and
//! reserves the band `0..=OFFSET`: any code decoding into it is rejected
//! before storage is touched.

use std::sync::Arc;

use tracing::{debug, info};

use crate::codec;
use crate::error::{Error, Result};
use crate::model::{ShortenedUrl, UrlId};
use crate::storage::UrlStore;

/// Value added to every id before encoding
pub const OFFSET: u64 = 1_000_000;

/// Shortening service: mints codes, resolves them and forwards record
/// management to the storage backend.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn UrlStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// Public code for the record with `id`.
    ///
    /// Pure arithmetic: the id is not checked against storage.
    pub fn mint_code(&self, id: UrlId) -> Result<String> {
        let shifted = id.checked_add(OFFSET).ok_or(Error::IdOutOfRange(id))?;
        Ok(codec::encode(shifted))
    }

    /// Target URL behind a public code.
    ///
    /// Codes decoding to `OFFSET` or below resolve to `None` without a
    /// storage lookup, which also makes id 0 unreachable from here. A code
    /// with characters outside the alphabet is an [`Error::MalformedCode`].
    pub async fn resolve_code(&self, code: &str) -> Result<Option<String>> {
        let decoded = codec::decode(code)?;

        let real_id = match decoded.checked_sub(OFFSET) {
            Some(id) if id > 0 => id,
            _ => {
                debug!(code, decoded, "short code below the reserved band");
                return Ok(None);
            }
        };

        let record = self.store.find_readonly(real_id).await?;
        match &record {
            Some(_) => debug!(code, id = real_id, "short code resolved"),
            None => debug!(code, id = real_id, "short code has no record"),
        }

        Ok(record.map(|record| record.target))
    }

    /// Stores `target` as given; no URL validation is performed.
    pub async fn create(&self, target: String) -> Result<ShortenedUrl> {
        let record = self.store.create(target).await?;
        info!(id = record.id, target = %record.target, "short url created");
        Ok(record)
    }

    pub async fn read(&self, id: UrlId) -> Result<Option<ShortenedUrl>> {
        Ok(self.store.find(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<ShortenedUrl>> {
        Ok(self.store.list().await?)
    }

    /// Replaces the target of `id`. Unknown ids are a successful no-op.
    pub async fn update(&self, id: UrlId, target: String) -> Result<()> {
        if self.store.replace_target(id, target).await? {
            info!(id, "short url updated");
        } else {
            debug!(id, "update skipped, no such record");
        }
        Ok(())
    }

    /// Removes `id`. Unknown ids are a successful no-op.
    pub async fn delete(&self, id: UrlId) -> Result<()> {
        if self.store.remove(id).await? {
            info!(id, "short url deleted");
        } else {
            debug!(id, "delete skipped, no such record");
        }
        Ok(())
    }
}
