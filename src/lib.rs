//! # Oolong
//!
//! An offline-first news synchronization cache.
//!
//! ## Architecture
//!
//! Oolong follows a modular pipeline architecture:
//!
//! ```text
//! FeedClient → Normalizer → SyncEngine → ArticleStore
//! ```
//!
//! The [`SyncEngine`](engine::SyncEngine) reconciles a remote, unreliable
//! headline feed with a bounded local store: one refresh is fetch →
//! normalize → dedup → merge → evict, and the read path degrades from cache
//! to network to bundled seed content instead of failing.
//!
//! ## Guarantees
//!
//! - At most one live article per URL (the natural dedup key)
//! - Never more than [`CACHE_CAPACITY`](engine::CACHE_CAPACITY) cached rows;
//!   eviction removes the oldest-ingested first
//! - Reads never block on the network and never surface refresh failures
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`client`]: Remote feed boundary (trait + reqwest implementation)
//! - [`config`]: Feed query parameters and credentials
//! - [`domain`]: Core models (Article, wire envelope)
//! - [`engine`]: Refresh orchestration, eviction, read-with-fallback
//! - [`normalizer`]: Raw record validation and cleanup
//! - [`seed`]: Bundled fallback content
//! - [`store`]: SQLite persistence

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together store, client, and engine.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Remote feed boundary.
///
/// - [`FeedClient`](client::FeedClient): async trait for fetching a page
/// - [`HttpFeedClient`](client::HttpFeedClient): reqwest-based implementation
pub mod client;

/// TOML configuration for the feed query, loaded from
/// `~/.config/oolong/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): the cached unit, keyed by URL
/// - [`FeedPage`](domain::FeedPage): the untrusted wire envelope
pub mod domain;

/// The synchronization engine.
///
/// - [`SyncEngine::refresh`](engine::SyncEngine::refresh): fetch → normalize
///   → dedup → merge → evict, serialized per engine
/// - [`SyncEngine::get`](engine::SyncEngine::get): two-emission read with
///   seed fallback
pub mod engine;

/// Converts raw feed records into store-ready articles; drops records
/// missing a title or URL, tolerates broken timestamps.
pub mod normalizer;

/// Static fallback articles, used at most once per cold boot from an
/// empty store.
pub mod seed;

/// SQLite persistence.
///
/// - [`ArticleStore`](store::ArticleStore): storage contract
/// - [`SqliteStore`](store::SqliteStore): rusqlite implementation
pub mod store;
