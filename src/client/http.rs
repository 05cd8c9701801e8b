use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use url::Url;

use crate::app::{OolongError, Result};
use crate::client::{FeedClient, FeedQuery};
use crate::domain::FeedPage;

const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2";

pub struct HttpFeedClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpFeedClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string(), api_key)
    }

    pub fn with_endpoint(endpoint: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent("oolong/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch_page(&self, query: &FeedQuery) -> Result<FeedPage> {
        let params = [
            ("category", query.category.clone()),
            ("country", query.country.clone()),
            ("pageSize", query.page_size.to_string()),
        ];
        let url = Url::parse_with_params(&format!("{}/top-headlines", self.endpoint), &params)?;

        let mut headers = HeaderMap::new();
        // The key never goes in the URL so it cannot leak into logs.
        if let Ok(value) = HeaderValue::from_str(&self.api_key) {
            headers.insert("X-Api-Key", value);
        }

        let response = self.client.get(url).headers(headers).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?.to_vec();
        decode_page(&body)
    }
}

/// Classify a raw response body: undecodable bodies are malformed payloads,
/// a decoded envelope whose status is not `"ok"` is a failure even when it
/// carries articles.
fn decode_page(body: &[u8]) -> Result<FeedPage> {
    let page: FeedPage = serde_json::from_slice(body)
        .map_err(|e| OolongError::MalformedPayload(e.to_string()))?;

    if page.status != "ok" {
        return Err(OolongError::FeedStatus(page.status));
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_accepts_ok_envelope() {
        let body = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{"title": "A", "url": "https://example.com/a"}]
        }"#;

        let page = decode_page(body.as_bytes()).unwrap();
        assert_eq!(page.total_results, 1);
        assert_eq!(page.articles.len(), 1);
    }

    #[test]
    fn test_decode_page_rejects_error_status_even_with_articles() {
        let body = r#"{
            "status": "error",
            "totalResults": 1,
            "articles": [{"title": "A", "url": "https://example.com/a"}]
        }"#;

        let err = decode_page(body.as_bytes()).unwrap_err();
        assert!(matches!(err, OolongError::FeedStatus(ref s) if s == "error"));
    }

    #[test]
    fn test_decode_page_rejects_undecodable_body() {
        let err = decode_page(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, OolongError::MalformedPayload(_)));
    }

    #[test]
    fn test_decode_page_rejects_missing_status() {
        // Valid JSON, but the default empty status is not "ok".
        let err = decode_page(b"{}").unwrap_err();
        assert!(matches!(err, OolongError::FeedStatus(ref s) if s.is_empty()));
    }
}
