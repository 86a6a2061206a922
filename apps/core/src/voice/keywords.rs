//! Keyword vocabularies and keyword extraction for voice transcripts.
//!
//! Vocabulary checks are substring checks on the lowercased,
//! punctuation-stripped transcript, so "shows" triggers "show" and "q3" in
//! "q3results" still counts as a period.

use std::collections::HashMap;

use crate::nlp::normalizer::strip_punctuation;
use crate::nlp::StopWords;

/// Any of these turns the utterance into a filter request.
pub const FILTER_WORDS: &[&str] = &["filter", "show", "display", "view", "only", "see"];

/// Department vocabulary, recorded as-is in the keyword list.
pub const DEPARTMENT_WORDS: &[&str] = &[
    "engineering",
    "marketing",
    "sales",
    "hr",
    "human resources",
    "product",
];

/// Period vocabulary, recorded as-is in the keyword list.
pub const PERIOD_WORDS: &[&str] = &[
    "day", "week", "month", "quarter", "year", "q1", "q2", "q3", "q4",
];

pub const COMPARE_WORDS: &[&str] = &["compare", "comparison", "versus", "vs", "against"];

pub const INSIGHT_WORDS: &[&str] = &["insight", "analyze", "analysis", "summary", "summarize"];

/// Marker keyword for [`FILTER_WORDS`].
pub const FILTER: &str = "filter";
/// Marker keyword for [`COMPARE_WORDS`].
pub const COMPARE: &str = "compare";
/// Marker keyword for [`INSIGHT_WORDS`].
pub const INSIGHT: &str = "insight";

/// Ordered keyword list of one transcript.
///
/// Order: filter marker, departments, periods, compare marker, insight
/// marker, then the most frequent remaining tokens.
pub fn extract_keywords(transcript: &str, stop_words: &StopWords, frequent: usize) -> Vec<String> {
    let text = strip_punctuation(transcript);
    let mut keywords: Vec<String> = Vec::new();

    if FILTER_WORDS.iter().any(|w| text.contains(w)) {
        keywords.push(FILTER.to_string());
    }
    keywords.extend(
        DEPARTMENT_WORDS
            .iter()
            .chain(PERIOD_WORDS)
            .filter(|w| text.contains(*w))
            .map(|w| w.to_string()),
    );
    if COMPARE_WORDS.iter().any(|w| text.contains(w)) {
        keywords.push(COMPARE.to_string());
    }
    if INSIGHT_WORDS.iter().any(|w| text.contains(w)) {
        keywords.push(INSIGHT.to_string());
    }

    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|t| !stop_words.contains(t))
        .collect();

    // The top tokens are picked first, then the ones already present dropped
    let extra: Vec<String> = most_frequent(&tokens, frequent)
        .into_iter()
        .filter(|t| !keywords.iter().any(|k| k == t))
        .map(str::to_string)
        .collect();
    keywords.extend(extra);

    keywords
}

/// The `n` most frequent tokens, ties in first-seen order.
fn most_frequent<'t>(tokens: &[&'t str], n: usize) -> Vec<&'t str> {
    let mut counts: HashMap<&'t str, (usize, usize)> = HashMap::new();
    for (idx, token) in tokens.iter().enumerate() {
        counts.entry(*token).or_insert((0, idx)).0 += 1;
    }

    let mut ranked: Vec<(&'t str, usize, usize)> =
        counts.into_iter().map(|(t, (count, first))| (t, count, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked.into_iter().take(n).map(|(t, _, _)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(transcript: &str) -> Vec<String> {
        extract_keywords(transcript, &StopWords::english(), 5)
    }

    #[test]
    fn test_vocabulary_order() {
        assert_eq!(
            keywords("Filter to engineering for last month"),
            vec!["filter", "engineering", "month", "last"]
        );
    }

    #[test]
    fn test_comparison_keywords() {
        assert_eq!(
            keywords("compare q1 and q3 data"),
            vec!["q1", "q3", "compare", "data"]
        );
    }

    #[test]
    fn test_substring_matching() {
        // "shows" contains "show", "summarize" triggers the insight marker
        let kw = keywords("It shows; summarize!");
        assert_eq!(&kw[..2], &["filter".to_string(), "insight".to_string()]);
    }

    #[test]
    fn test_frequent_tokens_are_capped_before_dedup() {
        let kw = extract_keywords("alpha beta alpha gamma", &StopWords::english(), 2);
        assert_eq!(kw, vec!["alpha", "beta"]);

        let kw = extract_keywords("filter filter beta", &StopWords::english(), 1);
        assert_eq!(kw, vec!["filter"]);
    }

    #[test]
    fn test_unknown_words_only() {
        assert_eq!(keywords("asdkjh qwoe"), vec!["asdkjh", "qwoe"]);
        assert!(keywords("").is_empty());
    }
}
