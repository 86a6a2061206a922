//! Text Normalizer.
//!
//! Lowercases, strips punctuation and digits, drops stop-words and lemmatizes.
//! Output is a fixed point: `normalize(normalize(t)) == normalize(t)`.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::resources::NlpResources;

// NOTE: expect() is acceptable here, the patterns are literals checked by the unit tests.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid regex: non-word pattern"));

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid regex: digit pattern"));

/// Lowercase and strip everything but word characters and whitespace.
pub(crate) fn strip_punctuation(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Normalizer over the shared stop-word list and lemmatizer
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    resources: Arc<NlpResources>,
}

impl TextNormalizer {
    pub fn new(resources: Arc<NlpResources>) -> Self {
        Self { resources }
    }

    /// Normalized tokens of `text`, in order.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let stripped = strip_punctuation(text);
        let stripped = DIGITS.replace_all(&stripped, "");

        stripped
            .split_whitespace()
            .filter(|token| !self.resources.stop_words.contains(token))
            .map(|token| self.resources.lemmatizer.lemmatize(token))
            // A lemma can itself be a stop-word ("wills" -> "will")
            .filter(|lemma| !lemma.is_empty() && !self.resources.stop_words.contains(lemma))
            .collect()
    }

    /// Normalize `text` into a single space-joined string. Empty means "no signal".
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}
