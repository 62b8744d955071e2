//! Line classification — keyword rules in strict priority order.
//!
//! A boundary line must never be absorbed as summary text, so the rules
//! are evaluated first-match-wins: boundary > charge > summary. The
//! classifier is pure and total; blank lines are the caller's problem.

/// Role of a single document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Starts a new case record; the full line is the client label.
    CaseBoundary,
    /// Carries a delimiter-separated charges clause.
    ChargeLine,
    /// Carries summary narrative introduced by a keyword.
    SummaryLine,
    /// Anything else; treated as additional summary narrative.
    Unclassified,
}

/// Classify one non-blank line.
pub fn classify(line: &str) -> LineClass {
    if line.contains(" v. ") {
        return LineClass::CaseBoundary;
    }
    let lower = line.to_lowercase();
    if lower.contains("section") {
        LineClass::ChargeLine
    } else if lower.contains("summary") || lower.contains("facts") {
        LineClass::SummaryLine
    } else {
        LineClass::Unclassified
    }
}

/// Extract the charges from a charge line: the portion after the last `:`
/// (the whole line if there is none), split on `,` with each piece trimmed.
pub fn charge_payload(line: &str) -> Vec<String> {
    let clause = match line.rsplit_once(':') {
        Some((_, rest)) => rest,
        None => line,
    };
    clause
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Extract the summary contribution from a summary line: the portion after
/// the first `:`, or the whole line if there is none.
pub fn summary_payload(line: &str) -> &str {
    match line.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => line.trim(),
    }
}
