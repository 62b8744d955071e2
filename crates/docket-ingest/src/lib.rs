//! Docket Ingest — line classification, document parsing, source readers.
//!
//! Raw documents come in as ordered line sequences. `classify` assigns
//! each line a role, `DocumentParser` folds the lines into immutable
//! `CaseRecord`s, and `reader`/`corpus` get the lines out of files.

pub mod classify;
pub mod corpus;
pub mod parse;
pub mod reader;

pub use classify::{classify, LineClass};
pub use corpus::{load_corpus, load_document};
pub use parse::DocumentParser;
pub use reader::{read_lines, FileType};
