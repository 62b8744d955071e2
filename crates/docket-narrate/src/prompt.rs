//! Prompt builders for the narrative slots.

/// Prompt for a plain-language rewrite of a case summary.
pub fn simplify(summary: &str) -> String {
    format!("Summarize this case in simple terms:\n\n{}", summary)
}

/// Prompt for next legal steps, key issues, and suggestions.
pub fn suggestions(summary: &str) -> String {
    format!(
        "You are a legal expert. Based on this case, give next legal steps, \
         key issues, and suggestions.\n\n{}",
        summary
    )
}

/// Prompt answering a follow-up question from one case.
pub fn answer(summary: &str, question: &str) -> String {
    format!(
        "Based on this case:\n\n{}\n\nAnswer this question:\n{}",
        summary, question
    )
}

/// Prompt answering a free-text query from several ranked cases.
pub fn answer_from_cases(summaries: &[&str], query: &str) -> String {
    format!(
        "Based on the following legal cases:\n\n{}\n\nAnswer this query:\n{}",
        summaries.join("\n\n"),
        query
    )
}
