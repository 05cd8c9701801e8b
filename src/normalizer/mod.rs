use std::collections::HashSet;

use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;
use url::Url;

use crate::domain::{Article, FeedPage, RawArticle};

/// Converts raw feed records into store-ready [`Article`]s.
///
/// Validation is per-record and absorbing: a record missing its title or URL
/// is dropped, never fatal to the batch.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a single raw record.
    ///
    /// Returns `None` when the title or URL is absent, blank, or the URL
    /// fails to parse. A missing or malformed `publishedAt` substitutes
    /// `now` rather than rejecting the record: cosmetic timestamp issues
    /// must never drop otherwise-valid content.
    pub fn normalize(&self, raw: &RawArticle, now: DateTime<Utc>) -> Option<Article> {
        let title = raw.title.as_deref().filter(|t| !t.trim().is_empty())?;
        let url = raw.url.as_deref().filter(|u| !u.trim().is_empty())?;
        Url::parse(url).ok()?;

        let ingested_at = raw
            .published_at
            .as_deref()
            .and_then(Self::parse_timestamp)
            .unwrap_or(now);

        Some(Article {
            id: 0,
            url: url.to_string(),
            title: decode_html_entities(title).to_string(),
            summary: raw
                .description
                .as_deref()
                .map(|d| decode_html_entities(d).to_string())
                .unwrap_or_default(),
            source: raw.source.name.clone().unwrap_or_default(),
            ingested_at,
        })
    }

    /// Normalize a whole page, preserving feed order, then dedup within the
    /// batch by URL keeping the first occurrence (feed order is the feed's
    /// preferred ranking).
    pub fn normalize_page(&self, page: &FeedPage, now: DateTime<Utc>) -> Vec<Article> {
        let mut seen = HashSet::new();
        page.articles
            .iter()
            .filter_map(|raw| self.normalize(raw, now))
            .filter(|article| seen.insert(article.url.clone()))
            .collect()
    }

    fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wire::RawSource;

    fn raw(title: Option<&str>, url: Option<&str>) -> RawArticle {
        RawArticle {
            title: title.map(String::from),
            description: None,
            url: url.map(String::from),
            published_at: None,
            source: RawSource::default(),
        }
    }

    #[test]
    fn test_rejects_missing_title() {
        let normalizer = Normalizer::new();
        assert!(normalizer
            .normalize(&raw(None, Some("https://example.com/a")), Utc::now())
            .is_none());
    }

    #[test]
    fn test_rejects_blank_url() {
        let normalizer = Normalizer::new();
        assert!(normalizer
            .normalize(&raw(Some("Headline"), Some("   ")), Utc::now())
            .is_none());
        assert!(normalizer
            .normalize(&raw(Some("Headline"), None), Utc::now())
            .is_none());
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let normalizer = Normalizer::new();
        assert!(normalizer
            .normalize(&raw(Some("Headline"), Some("not a url")), Utc::now())
            .is_none());
    }

    #[test]
    fn test_malformed_timestamp_falls_back_to_now() {
        let normalizer = Normalizer::new();
        let now = Utc::now();
        let mut record = raw(Some("Headline"), Some("https://example.com/a"));
        record.published_at = Some("yesterday-ish".into());

        let article = normalizer.normalize(&record, now).unwrap();
        assert_eq!(article.ingested_at, now);
    }

    #[test]
    fn test_valid_timestamp_is_kept() {
        let normalizer = Normalizer::new();
        let mut record = raw(Some("Headline"), Some("https://example.com/a"));
        record.published_at = Some("2024-01-01T12:00:00Z".into());

        let article = normalizer.normalize(&record, Utc::now()).unwrap();
        assert_eq!(article.ingested_at.to_rfc3339(), "2024-01-01T12:00:00+00:00");
    }

    #[test]
    fn test_html_entities_decoded() {
        let normalizer = Normalizer::new();
        let mut record = raw(Some("Rust &amp; Tea"), Some("https://example.com/a"));
        record.description = Some("5 &gt; 3".into());

        let article = normalizer.normalize(&record, Utc::now()).unwrap();
        assert_eq!(article.title, "Rust & Tea");
        assert_eq!(article.summary, "5 > 3");
    }

    #[test]
    fn test_batch_drops_invalid_records() {
        let normalizer = Normalizer::new();
        let page = FeedPage {
            status: "ok".into(),
            total_results: 5,
            articles: vec![
                raw(Some("A"), Some("https://example.com/a")),
                raw(Some("B"), None),
                raw(Some("C"), Some("https://example.com/c")),
                raw(Some("D"), None),
                raw(Some("E"), Some("https://example.com/e")),
            ],
        };

        let articles = normalizer.normalize_page(&page, Utc::now());
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "A");
        assert_eq!(articles[1].title, "C");
        assert_eq!(articles[2].title, "E");
    }

    #[test]
    fn test_batch_dedup_keeps_first_occurrence() {
        let normalizer = Normalizer::new();
        let page = FeedPage {
            status: "ok".into(),
            total_results: 3,
            articles: vec![
                raw(Some("First"), Some("https://example.com/same")),
                raw(Some("Second"), Some("https://example.com/same")),
                raw(Some("Other"), Some("https://example.com/other")),
            ],
        };

        let articles = normalizer.normalize_page(&page, Utc::now());
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "First");
        assert_eq!(articles[1].title, "Other");
    }
}
