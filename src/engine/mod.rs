use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, Mutex};

use crate::app::{OolongError, Result};
use crate::client::{FeedClient, FeedQuery};
use crate::domain::Article;
use crate::normalizer::Normalizer;
use crate::seed::SeedProvider;
use crate::store::ArticleStore;

/// Hard ceiling on cached articles. Static configuration, not runtime state.
pub const CACHE_CAPACITY: i64 = 100;

/// Orchestrates fetch → normalize → dedup → merge → evict, and exposes the
/// read-with-fallback accessor used by every consumer.
///
/// One engine/store pair per installation, explicitly constructed and passed
/// by reference; there is no hidden global.
pub struct SyncEngine {
    store: Arc<dyn ArticleStore + Send + Sync>,
    client: Arc<dyn FeedClient + Send + Sync>,
    normalizer: Normalizer,
    seed: SeedProvider,
    query: FeedQuery,
    refresh_lock: Mutex<()>,
    capacity: i64,
}

impl SyncEngine {
    pub fn new(
        store: Arc<dyn ArticleStore + Send + Sync>,
        client: Arc<dyn FeedClient + Send + Sync>,
        query: FeedQuery,
    ) -> Self {
        Self::with_capacity(store, client, query, CACHE_CAPACITY)
    }

    pub fn with_capacity(
        store: Arc<dyn ArticleStore + Send + Sync>,
        client: Arc<dyn FeedClient + Send + Sync>,
        query: FeedQuery,
        capacity: i64,
    ) -> Self {
        Self {
            store,
            client,
            normalizer: Normalizer::new(),
            seed: SeedProvider::new(),
            query,
            refresh_lock: Mutex::new(()),
            capacity,
        }
    }

    /// Fetch one feed page and merge it into the store.
    ///
    /// Concurrent calls serialize on a per-engine lock so that the
    /// dedup-then-insert-then-evict sequence is observed as one atomic unit;
    /// two interleaved refreshes could otherwise both pass the set-difference
    /// check against a stale key set. The store's write lock is never held
    /// across network I/O: the fetch completes before any write starts.
    ///
    /// No implicit retry. The caller decides whether and when to try again.
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        let page = self.client.fetch_page(&self.query).await?;

        let now = Utc::now();
        let batch = self.normalizer.normalize_page(&page, now);

        let existing = self.store.all_urls()?;
        let fresh: Vec<Article> = batch
            .into_iter()
            .filter(|article| !existing.contains(&article.url))
            .collect();

        if fresh.is_empty() && page.total_results == 0 {
            if self.store.count()? == 0 {
                return Err(OolongError::EmptyFeed);
            }
            // A no-op refresh is valid once data exists.
            tracing::debug!("feed reported no articles; cache already populated");
            return Ok(());
        }

        let inserted = self.store.insert_many(&fresh)?;
        tracing::info!(inserted, "merged feed page into cache");

        self.evict_over_capacity()?;
        Ok(())
    }

    /// Read with fallback: a sequence of at most two snapshots.
    ///
    /// The first emission is the current local snapshot (possibly empty) and
    /// is buffered before this returns; it never waits on the network. A
    /// single background refresh then runs: on success a second snapshot is
    /// emitted only if the local count changed, on failure nothing is
    /// emitted unless the store was empty, in which case the seed snapshot
    /// is persisted and emitted exactly once. Refresh failures never reach
    /// the caller on this path.
    ///
    /// Dropping the receiver abandons the sequence; the store is only ever
    /// touched in whole transactions, so abandonment cannot half-commit.
    pub fn get(self: Arc<Self>) -> mpsc::Receiver<Vec<Article>> {
        let (tx, rx) = mpsc::channel(2);

        let first = match self.store.list_recent(self.capacity) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("local snapshot failed: {e}");
                Vec::new()
            }
        };
        let first_count = first.len();
        let was_empty = first.is_empty();
        // Channel is empty and has room for both emissions, so this
        // cannot fail while the receiver is alive.
        let _ = tx.try_send(first);

        let engine = self;
        tokio::spawn(async move {
            match engine.refresh().await {
                Ok(()) => match engine.store.list_recent(engine.capacity) {
                    Ok(updated) => {
                        if updated.len() != first_count {
                            let _ = tx.send(updated).await;
                        }
                    }
                    Err(e) => tracing::warn!("post-refresh snapshot failed: {e}"),
                },
                Err(e) => {
                    tracing::warn!("background refresh failed: {e}");
                    if was_empty {
                        match engine.persist_seed() {
                            Ok(seeded) => {
                                let _ = tx.send(seeded).await;
                            }
                            Err(e) => tracing::warn!("seed fallback failed: {e}"),
                        }
                    }
                }
            }
        });

        rx
    }

    pub fn count(&self) -> Result<i64> {
        self.store.count()
    }

    pub fn list_recent(&self, limit: i64) -> Result<Vec<Article>> {
        self.store.list_recent(limit)
    }

    /// Recovery/reset path: drop every cached article.
    pub fn clear(&self) -> Result<()> {
        self.store.clear_all()
    }

    /// Insert the bundled seed articles and return the resulting snapshot.
    /// A repeated call is a no-op insert thanks to URL dedup.
    fn persist_seed(&self) -> Result<Vec<Article>> {
        let seeds = self.seed.seed_articles(Utc::now());
        self.store.insert_many(&seeds)?;
        self.store.list_recent(self.capacity)
    }

    fn evict_over_capacity(&self) -> Result<()> {
        let count = self.store.count()?;
        if count > self.capacity {
            let excess = count - self.capacity;
            tracing::debug!(excess, "evicting oldest articles");
            self.store.delete_oldest(excess).inspect_err(|e| {
                if matches!(e, OolongError::Invariant(_)) {
                    tracing::error!("eviction invariant failure: {e}");
                }
            })?;
        }
        Ok(())
    }
}
