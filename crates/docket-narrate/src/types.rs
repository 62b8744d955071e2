//! Narrative collaborator error kinds.

use thiserror::Error;

/// Ways a narrative generation call can fail. Callers never surface these
/// raw; each output slot degrades to a placeholder string.
#[derive(Error, Debug)]
pub enum NarrateError {
    #[error("narrator not configured (missing API key)")]
    Unconfigured,

    #[error("request failed: {0}")]
    Http(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("empty response from narrator")]
    EmptyResponse,
}
