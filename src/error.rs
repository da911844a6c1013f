use std::io;
use thiserror::Error;
use serde::{Serialize, Deserialize};

#[derive(Error, Debug, Serialize, Deserialize)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Anyhow error: {0}")]
    Anyhow(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Json(err.to_string())
    }
}

impl From<io::Error> for FeedError {
    fn from(err: io::Error) -> Self {
        FeedError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for FeedError {
    fn from(err: anyhow::Error) -> Self {
        FeedError::Anyhow(err.to_string())
    }
}
