//! Deterministic rule-based answer heuristics
//!
//! Applied when no QA model is configured, when its confidence is below the
//! gate, or when it fails at call time. The rules are ordered and total:
//! rule 4 always produces something for a non-empty passage.

use std::sync::OnceLock;

use regex::Regex;

/// Frequency terms scanned in order for "how often" style questions.
const FREQUENCY_TERMS: [&str; 11] = [
    "quarterly",
    "monthly",
    "weekly",
    "daily",
    "annually",
    "yearly",
    "every quarter",
    "every month",
    "every week",
    "every day",
    "every year",
];

fn cardinal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d+|three|four|five|six|seven|eight|nine|ten)\b")
            .expect("static regex")
    })
}

/// Derive an answer from `passage` without a model.
///
/// 1. "how many" questions: first cardinal token in the passage (a digit
///    run or a spelled-out number word).
/// 2. "how often" / "frequency" questions: first known frequency term
///    present in the passage.
/// 3. First `.`-delimited sentence longer than 10 trimmed characters.
/// 4. First 100 characters of the passage.
pub fn heuristic_answer(query: &str, passage: &str) -> String {
    let query_lower = query.to_lowercase();
    let passage_lower = passage.to_lowercase();

    if query_lower.contains("how many") {
        if let Some(m) = cardinal_re().find(passage) {
            return m.as_str().to_string();
        }
    }

    if query_lower.contains("how often") || query_lower.contains("frequency") {
        for term in FREQUENCY_TERMS {
            if passage_lower.contains(term) {
                return term.to_string();
            }
        }
    }

    for sentence in passage.split('.') {
        let sentence = sentence.trim();
        if sentence.len() > 10 {
            return sentence.to_string();
        }
    }

    let end = passage
        .char_indices()
        .nth(100)
        .map_or(passage.len(), |(i, _)| i);
    passage[..end].to_string()
}
