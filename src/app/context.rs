use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{OolongError, Result};
use crate::client::{FeedClient, HttpFeedClient};
use crate::config::Config;
use crate::engine::SyncEngine;
use crate::store::SqliteStore;

/// Wires the store, feed client, and sync engine into one owned unit.
///
/// Exactly one context exists per process; every consumer reaches the cache
/// through `ctx.engine`, never the store directly.
pub struct AppContext {
    pub engine: Arc<SyncEngine>,
    pub config: Config,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load()?;
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let client: Arc<dyn FeedClient + Send + Sync> =
            Arc::new(HttpFeedClient::with_endpoint(
                config.feed.endpoint.clone(),
                config.feed.api_key.clone(),
            ));
        let engine = Arc::new(SyncEngine::new(store, client, config.feed_query()));

        Ok(Self { engine, config })
    }

    pub fn in_memory() -> Result<Self> {
        let config = Config::default();
        let store = Arc::new(SqliteStore::in_memory()?);
        let client: Arc<dyn FeedClient + Send + Sync> =
            Arc::new(HttpFeedClient::with_endpoint(
                config.feed.endpoint.clone(),
                config.feed.api_key.clone(),
            ));
        let engine = Arc::new(SyncEngine::new(store, client, config.feed_query()));

        Ok(Self { engine, config })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| OolongError::Config("Could not find data directory".into()))?;
        let oolong_dir = data_dir.join("oolong");
        std::fs::create_dir_all(&oolong_dir)?;
        Ok(oolong_dir.join("oolong.db"))
    }
}
