//! Noun lemmatizer.
//!
//! Reduces plural nouns to their dictionary form with an irregular-form table
//! and a short list of suffix rules. Verbs and adjectives pass through
//! unchanged, as with a noun-only dictionary lemmatizer.
//!
//! Every rule output is itself a fixed point: no lemma ends in a suffix that
//! another rule would strip again.

use std::collections::{HashMap, HashSet};

/// Irregular plurals and words that only look plural.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
];

/// Words ending in "s" that are not plurals.
const NON_PLURALS: &[&str] = &[
    "always",
    "perhaps",
    "sometimes",
    "whereas",
    "besides",
    "towards",
    "afterwards",
    "overseas",
    "chaos",
    "ethos",
    "atlas",
    "canvas",
];

/// Endings that never mark a plural ("class", "status", "analysis").
const INVARIANT_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Plural endings that drop "es" rather than "s".
const ES_ENDINGS: &[&str] = &["sses", "ches", "shes", "xes", "zzes"];

/// Dictionary-free noun lemmatizer
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    non_plurals: HashSet<&'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR.iter().copied().collect(),
            non_plurals: NON_PLURALS.iter().copied().collect(),
        }
    }

    /// Lemmatize a single lowercase token.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular.get(word) {
            return (*lemma).to_string();
        }

        let lemma = self.strip_plural(word);
        // "childrens" -> "children" -> "child"
        match self.irregular.get(lemma.as_str()) {
            Some(irregular) => (*irregular).to_string(),
            None => lemma,
        }
    }

    fn strip_plural(&self, word: &str) -> String {
        if word.chars().count() <= 3
            || self.non_plurals.contains(word)
            || INVARIANT_ENDINGS.iter().any(|end| word.ends_with(end))
        {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return format!("{}y", stem);
            }
        }

        if ES_ENDINGS.iter().any(|end| word.ends_with(end)) {
            return word[..word.len() - 2].to_string();
        }

        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}
