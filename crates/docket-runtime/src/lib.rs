//! Docket Runtime — orchestrates the lookup verbs.
//!
//! The orchestrator owns the injected service handles (embedder, optional
//! narrator) and wires parser, matcher, and collaborator into the two
//! user-facing questions: "which case matches this client name?" and
//! "which cases answer this legal query?".

pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::*;
