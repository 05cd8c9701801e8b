use chrono::{DateTime, Duration, Utc};

use crate::domain::Article;

/// Static fallback content, shown only when the store is empty and the
/// network is unavailable. Pure: the output depends only on `now`.
#[derive(Clone, Default)]
pub struct SeedProvider;

impl SeedProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn seed_articles(&self, now: DateTime<Utc>) -> Vec<Article> {
        let entries: [(&str, &str, &str, i64); 5] = [
            (
                "Offline-first caching keeps readers going",
                "How a bounded local store with URL-level deduplication lets a \
                 news reader keep working through flaky connectivity.",
                "https://blog.rust-lang.org/2016/05/16/rust-at-one-year.html",
                5,
            ),
            (
                "SQLite as an application file format",
                "A single-file transactional database is a sturdy foundation \
                 for durable client-side caches.",
                "https://sqlite.org/appfileformat.html",
                10,
            ),
            (
                "Designing idempotent sync pipelines",
                "Fetch, normalize, deduplicate, merge, evict: making every \
                 step safe to repeat is what makes sync boring.",
                "https://docs.rs/rusqlite/latest/rusqlite/",
                15,
            ),
            (
                "Capacity bounds and eviction policies",
                "Why evicting by first-ingestion time rather than last access \
                 keeps a news cache honest about freshness.",
                "https://docs.rs/tokio/latest/tokio/sync/index.html",
                20,
            ),
            (
                "Graceful degradation over hard failure",
                "A read path that never errors: cache first, network second, \
                 bundled seed content as the floor.",
                "https://docs.rs/reqwest/latest/reqwest/",
                25,
            ),
        ];

        entries
            .iter()
            .map(|(title, summary, url, minutes_ago)| Article {
                id: 0,
                url: (*url).to_string(),
                title: (*title).to_string(),
                summary: (*summary).to_string(),
                source: "oolong".to_string(),
                ingested_at: now - Duration::minutes(*minutes_ago),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_fixed_now() {
        let provider = SeedProvider::new();
        let now = Utc::now();
        assert_eq!(provider.seed_articles(now), provider.seed_articles(now));
    }

    #[test]
    fn test_five_entries_newest_first() {
        let provider = SeedProvider::new();
        let now = Utc::now();
        let seeds = provider.seed_articles(now);

        assert_eq!(seeds.len(), 5);
        for pair in seeds.windows(2) {
            assert!(pair[0].ingested_at > pair[1].ingested_at);
        }
        assert!(seeds.iter().all(|s| s.ingested_at < now));
    }

    #[test]
    fn test_urls_are_unique() {
        let provider = SeedProvider::new();
        let seeds = provider.seed_articles(Utc::now());
        let urls: std::collections::HashSet<_> = seeds.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls.len(), seeds.len());
    }
}
