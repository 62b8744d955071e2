//! Docket Narrate — the generative narrative collaborator.
//!
//! The core system only decides what text is sent and what comes back.
//! Generation quality is out of scope; failure is not: every call site
//! substitutes an explicit placeholder instead of propagating an error to
//! the presentation layer.

pub mod prompt;
pub mod provider;
pub mod types;

pub use provider::{with_placeholder, GeminiNarrator, Narrator};
pub use types::NarrateError;
