use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached news article.
///
/// The `url` is the natural dedup key: at most one live article per URL.
/// `ingested_at` is set on first insert and never updated afterwards, so it
/// doubles as the eviction ordering key (oldest ingested goes first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Store-assigned surrogate id; 0 until the row is inserted.
    pub id: i64,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub ingested_at: DateTime<Utc>,
}

impl Article {
    pub fn new(url: String, title: String, ingested_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            url,
            title,
            summary: String::new(),
            source: String::new(),
            ingested_at,
        }
    }
}
