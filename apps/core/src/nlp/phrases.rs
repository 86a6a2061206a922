//! Key Phrase Extractor.
//!
//! Noun chunks and named entities of the raw text are merged into one list
//! (chunks first, then entities, each in text order), counted, and ranked by
//! frequency. Ties keep first-seen order.

use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::resources::NlpResources;

// NOTE: expect() is acceptable here, the pattern is a literal checked by the unit tests.
static WORD_OR_MARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9]+(?:['’-][A-Za-z0-9]+)*|[^\sA-Za-z0-9]")
        .expect("Invalid regex: chunker token pattern")
});

/// Words that may open a noun chunk.
const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "our", "your", "their", "his",
    "her", "its", "some", "any", "every", "each", "no", "another",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "we", "us", "you", "he", "him", "she", "it", "they", "them", "myself",
    "ourselves", "yourself", "themselves", "everyone", "everybody", "someone", "somebody",
    "anyone", "nobody", "something", "anything", "nothing", "everything",
];

/// Frequent verbs, auxiliaries and adverbs that the stop-word list misses.
const VERB_HINTS: &[&str] = &[
    "would", "could", "might", "must", "shall", "may", "get", "gets", "got", "getting", "make",
    "makes", "made", "making", "feel", "feels", "felt", "think", "thinks", "thought", "need",
    "needs", "needed", "want", "wants", "wanted", "seem", "seems", "seemed", "become", "became",
    "keep", "keeps", "kept", "take", "takes", "took", "give", "gives", "gave", "know", "knew",
    "like", "likes", "liked", "love", "loved", "hate", "hated", "say", "says", "said", "go",
    "goes", "went", "come", "came", "see", "saw", "also", "always", "never", "often", "still",
    "even", "well", "much", "many", "yet", "ever", "already", "however", "though", "although",
];

fn is_breaker(lower: &str, resources: &NlpResources) -> bool {
    PRONOUNS.contains(&lower)
        || VERB_HINTS.contains(&lower)
        || resources.stop_words.contains(lower)
        || (lower.len() > 4 && lower.ends_with("ly"))
        || lower.chars().all(|c| c.is_ascii_digit())
}

fn flush(chunks: &mut Vec<String>, current: &mut Vec<&str>, content_words: &mut usize) {
    if *content_words > 0 {
        chunks.push(current.join(" "));
    }
    current.clear();
    *content_words = 0;
}

/// Noun-chunk-like spans: optional determiner followed by a run of content words.
pub fn noun_chunks(text: &str, resources: &NlpResources) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut content_words = 0;

    for token in WORD_OR_MARK.find_iter(text).map(|m| m.as_str()) {
        let is_word = token.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
        if !is_word {
            flush(&mut chunks, &mut current, &mut content_words);
            continue;
        }

        let lower = token.to_lowercase();
        if DETERMINERS.contains(&lower.as_str()) {
            flush(&mut chunks, &mut current, &mut content_words);
            current.push(token);
        } else if is_breaker(&lower, resources) {
            flush(&mut chunks, &mut current, &mut content_words);
        } else {
            current.push(token);
            content_words += 1;
        }
    }
    flush(&mut chunks, &mut current, &mut content_words);

    chunks
}

/// Top `n` items of `merged` by count, ties by first occurrence.
fn most_common(merged: Vec<String>, n: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (idx, item) in merged.into_iter().enumerate() {
        counts.entry(item).or_insert((0, idx)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(item, (count, first))| (item, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked.into_iter().take(n).map(|(item, _, _)| item).collect()
}

/// Frequency-ranked noun phrases and entities
#[derive(Debug, Clone)]
pub struct KeyPhraseExtractor {
    resources: Arc<NlpResources>,
}

impl KeyPhraseExtractor {
    pub fn new(resources: Arc<NlpResources>) -> Self {
        Self { resources }
    }

    /// At most `n` phrases, never padded.
    pub fn extract_phrases(&self, text: &str, n: usize) -> Vec<String> {
        let mut merged = noun_chunks(text, &self.resources);
        merged.extend(
            self.resources
                .recognizer
                .recognize(text)
                .into_iter()
                .map(|entity| entity.text),
        );

        most_common(merged, n)
    }
}
