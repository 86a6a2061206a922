//! Sentiment lexicon.
//!
//! A tab-separated `token<TAB>valence` table, valences on the -4.0 .. 4.0
//! scale. The production table is embedded in the binary and parsed once when
//! [`super::resources::NlpResources`] is loaded.

use std::collections::HashMap;

use crate::error::AnalysisError;

/// Embedded production lexicon
const EMBEDDED_LEXICON: &str = include_str!("../../data/sentiment_lexicon.tsv");

/// Largest absolute valence a lexicon entry may carry.
const MAX_VALENCE: f64 = 4.0;

/// Token -> valence lookup
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
}

impl SentimentLexicon {
    /// Parse the embedded production lexicon.
    pub fn embedded() -> Result<Self, AnalysisError> {
        Self::parse(EMBEDDED_LEXICON)
    }

    /// Parse a lexicon table. Blank lines and `#` comments are skipped.
    pub fn parse(source: &str) -> Result<Self, AnalysisError> {
        let mut valences = HashMap::new();

        for (idx, line) in source.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (token, valence) = line.split_once('\t').ok_or_else(|| {
                AnalysisError::Unavailable(format!("Lexicon line {} has no tab separator", idx + 1))
            })?;

            let valence: f64 = valence.trim().parse().map_err(|e| {
                AnalysisError::Unavailable(format!("Lexicon line {}: {}", idx + 1, e))
            })?;

            if !valence.is_finite() || valence.abs() > MAX_VALENCE {
                return Err(AnalysisError::Unavailable(format!(
                    "Lexicon line {}: valence {} out of range",
                    idx + 1,
                    valence
                )));
            }

            valences.insert(token.trim().to_lowercase(), valence);
        }

        if valences.is_empty() {
            return Err(AnalysisError::Unavailable("Sentiment lexicon is empty".to_string()));
        }

        Ok(Self { valences })
    }

    /// Build a lexicon from in-memory pairs, mainly for fixtures.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            valences: pairs
                .iter()
                .map(|(token, valence)| (token.to_lowercase(), *valence))
                .collect(),
        }
    }

    /// Valence of a lowercase token.
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}
