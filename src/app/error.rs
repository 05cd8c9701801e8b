use thiserror::Error;

#[derive(Error, Debug)]
pub enum OolongError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Feed returned status {0:?}")]
    FeedStatus(String),

    #[error("Malformed feed payload: {0}")]
    MalformedPayload(String),

    #[error("Feed returned no usable articles")]
    EmptyFeed,

    #[error("Store invariant violated: {0}")]
    Invariant(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OolongError>;
