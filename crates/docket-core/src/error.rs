//! Error types for Docket.
//!
//! Absence of a result (empty query, empty corpus, no match above
//! threshold) is not an error; those paths return `Option`/empty
//! collections. The variants here cover genuinely failed operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Narrative error: {0}")]
    Narrative(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
