pub mod sqlite;

use std::collections::HashSet;

use crate::app::Result;
use crate::domain::Article;

pub use sqlite::SqliteStore;

/// Durable, ordered store of cached articles keyed by URL.
///
/// Implementations must be safe under concurrent readers and a single
/// concurrent writer; write operations serialize and each one is a single
/// transaction.
pub trait ArticleStore {
    fn count(&self) -> Result<i64>;

    /// Newest-first by `ingested_at`, surrogate id descending as tiebreak.
    fn list_recent(&self, limit: i64) -> Result<Vec<Article>>;

    /// All natural keys currently live, for the refresh set-difference.
    fn all_urls(&self) -> Result<HashSet<String>>;

    /// Bulk insert; rows whose URL already exists are skipped, not errors.
    /// Returns the number actually inserted.
    fn insert_many(&self, articles: &[Article]) -> Result<usize>;

    /// Delete exactly `count` rows, oldest `ingested_at` first, ascending id
    /// as tiebreak. Fails with an invariant error if `count` is negative or
    /// exceeds the current total; nothing is deleted in either case.
    fn delete_oldest(&self, count: i64) -> Result<()>;

    fn clear_all(&self) -> Result<()>;
}
