pub mod http;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::FeedPage;

pub use http::HttpFeedClient;

/// Query parameters for one feed page.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub category: String,
    pub country: String,
    pub page_size: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            category: "technology".into(),
            country: "us".into(),
            page_size: 20,
        }
    }
}

#[async_trait]
pub trait FeedClient {
    /// Fetch one page of candidate articles.
    ///
    /// Fails on transport errors, non-2xx responses, undecodable bodies,
    /// and envelopes whose `status` is not `"ok"`.
    async fn fetch_page(&self, query: &FeedQuery) -> Result<FeedPage>;
}
