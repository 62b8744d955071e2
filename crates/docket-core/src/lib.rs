//! Docket Core — case data model, configuration, error taxonomy.

pub mod config;
pub mod error;
pub mod record;

pub use config::{DocketConfig, MatchThresholds};
pub use error::{Error, Result};
pub use record::CaseRecord;
