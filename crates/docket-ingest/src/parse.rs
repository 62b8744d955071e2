//! Document parser — a finite-state accumulator over classified lines.
//!
//! One open record at a time. A boundary line finalizes the open record
//! (if any) and starts the next; end of input is the same flush
//! transition. Parsing never fails: malformed input degrades to fewer
//! records, worst case none.
//!
//! Field policy is accumulation: repeated charge lines extend `charges`,
//! repeated summary lines and unclassified narrative append to `summary`
//! joined with newlines.

use docket_core::CaseRecord;
use tracing::debug;

use crate::classify::{charge_payload, classify, summary_payload, LineClass};

/// Partial record while its lines are still arriving.
struct OpenRecord {
    client_label: String,
    charges: Vec<String>,
    summary_lines: Vec<String>,
}

impl OpenRecord {
    fn new(client_label: String) -> Self {
        Self {
            client_label,
            charges: Vec::new(),
            summary_lines: Vec::new(),
        }
    }

    fn finalize(self, source_id: &str) -> CaseRecord {
        CaseRecord {
            client_label: self.client_label,
            charges: self.charges,
            summary: self.summary_lines.join("\n"),
            source_id: source_id.to_string(),
        }
    }
}

/// Parser state: either between records or accumulating one.
enum ParserState {
    Idle,
    Open(OpenRecord),
}

/// Streaming parser for one source document.
pub struct DocumentParser {
    source_id: String,
    state: ParserState,
    records: Vec<CaseRecord>,
}

impl DocumentParser {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            state: ParserState::Idle,
            records: Vec::new(),
        }
    }

    /// Parse a full line sequence in one call.
    pub fn parse<I, S>(source_id: impl Into<String>, lines: I) -> Vec<CaseRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::new(source_id);
        for line in lines {
            parser.feed_line(line.as_ref());
        }
        parser.finish()
    }

    /// Feed one raw line. Blank lines are discarded before classification.
    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match classify(line) {
            LineClass::CaseBoundary => {
                self.flush();
                self.state = ParserState::Open(OpenRecord::new(line.to_string()));
            }
            LineClass::ChargeLine => match &mut self.state {
                ParserState::Open(open) => open.charges.extend(charge_payload(line)),
                // Orphan charge before any boundary is undefined data.
                ParserState::Idle => debug!("Dropping orphan charge line: {}", line),
            },
            LineClass::SummaryLine => match &mut self.state {
                ParserState::Open(open) => {
                    open.summary_lines.push(summary_payload(line).to_string())
                }
                ParserState::Idle => debug!("Dropping orphan summary line: {}", line),
            },
            LineClass::Unclassified => match &mut self.state {
                ParserState::Open(open) => open.summary_lines.push(line.to_string()),
                ParserState::Idle => debug!("Dropping orphan line: {}", line),
            },
        }
    }

    /// End of input: flush the open record and return the sequence.
    pub fn finish(mut self) -> Vec<CaseRecord> {
        self.flush();
        self.records
    }

    fn flush(&mut self) {
        if let ParserState::Open(open) = std::mem::replace(&mut self.state, ParserState::Idle) {
            self.records.push(open.finalize(&self.source_id));
        }
    }
}
