//! Data models for the URL shortener application
//!
//! This module defines the stored record and the request/response bodies of
//! the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric key assigned to every stored URL by the storage backend
pub type UrlId = u64;

/// A shortened URL as kept by the storage backend
///
/// `id` is issued by the store at creation time and never changes;
/// `target` is the only field an update replaces.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    /// Store-assigned key, starting at 1
    pub id: UrlId,

    /// The original long URL (stored as given, never validated)
    pub target: String,

    /// Timestamp when this record was created
    pub created_at: DateTime<Utc>,
}

impl ShortenedUrl {
    pub fn new(id: UrlId, target: impl Into<String>) -> Self {
        Self {
            id,
            target: target.into(),
            created_at: Utc::now(),
        }
    }
}

/// Request payload for creating or updating a short URL
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize, Debug)]
pub struct UrlRequest {
    /// The original URL to be shortened
    pub url: String,
}

/// Response returned after creating or fetching a record
///
/// # Example
/// ```json
/// {
///   "id": 1,
///   "code": "4C93",
///   "target": "https://example.com/very/long/url",
///   "created_at": "2026-01-17T13:40:00Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug)]
pub struct UrlResponse {
    pub id: UrlId,

    /// Public short code that redirects to `target`
    pub code: String,

    pub target: String,

    pub created_at: DateTime<Utc>,
}

impl UrlResponse {
    pub fn new(record: ShortenedUrl, code: String) -> Self {
        Self {
            id: record.id,
            code,
            target: record.target,
            created_at: record.created_at,
        }
    }
}

/// Response of the code minting endpoint
#[derive(Serialize, Deserialize, Debug)]
pub struct HashResponse {
    pub hash: String,
}
