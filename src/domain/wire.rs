use serde::Deserialize;

/// One page of the remote feed envelope.
///
/// Treated as untrusted input: every article field is optional and the
/// normalizer decides what survives. Only `status == "ok"` marks the
/// envelope itself as a success.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
    #[serde(rename = "totalResults", default)]
    pub total_results: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: RawSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_envelope() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "Example Wire"},
                    "title": "A headline",
                    "description": "Some summary",
                    "url": "https://example.com/a",
                    "publishedAt": "2024-01-01T00:00:00Z"
                },
                {"title": "Bare minimum"}
            ]
        }"#;

        let page: FeedPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.status, "ok");
        assert_eq!(page.total_results, 2);
        assert_eq!(page.articles.len(), 2);
        assert_eq!(page.articles[0].source.name.as_deref(), Some("Example Wire"));
        assert!(page.articles[1].url.is_none());
    }

    #[test]
    fn test_deserialize_missing_fields_defaults() {
        let page: FeedPage = serde_json::from_str("{}").unwrap();
        assert_eq!(page.status, "");
        assert_eq!(page.total_results, 0);
        assert!(page.articles.is_empty());
    }
}
