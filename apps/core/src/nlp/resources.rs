//! Shared, read-only NLP resources.
//!
//! Built once at startup by [`NlpResources::load`] and shared behind an `Arc`
//! by every component. Nothing here is mutated after construction, so calls
//! can run concurrently without coordination.

use tracing::info;

use super::entities::EntityRecognizer;
use super::lemmatizer::Lemmatizer;
use super::lexicon::SentimentLexicon;
use super::stopwords::StopWords;
use crate::error::AnalysisError;

/// Stop-words, lemmatizer, sentiment lexicon and entity recognizer
#[derive(Debug, Clone)]
pub struct NlpResources {
    pub(crate) stop_words: StopWords,
    pub(crate) lemmatizer: Lemmatizer,
    pub(crate) lexicon: SentimentLexicon,
    pub(crate) recognizer: EntityRecognizer,
}

impl NlpResources {
    /// Build the production resources: embedded lexicon, English stop-words.
    pub fn load() -> Result<Self, AnalysisError> {
        let lexicon = SentimentLexicon::embedded()?;
        let recognizer = EntityRecognizer::new()?;

        info!(
            lexicon_entries = lexicon.len(),
            "NLP resources loaded"
        );

        Ok(Self::new(StopWords::english(), Lemmatizer::new(), lexicon, recognizer))
    }

    /// Assemble resources from parts, e.g. a reduced lexicon in tests.
    pub fn new(
        stop_words: StopWords,
        lemmatizer: Lemmatizer,
        lexicon: SentimentLexicon,
        recognizer: EntityRecognizer,
    ) -> Self {
        Self {
            stop_words,
            lemmatizer,
            lexicon,
            recognizer,
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn lexicon(&self) -> &SentimentLexicon {
        &self.lexicon
    }

    pub fn recognizer(&self) -> &EntityRecognizer {
        &self.recognizer
    }
}

/// Production resources loaded once per test binary.
#[cfg(test)]
pub(crate) fn shared_for_tests() -> std::sync::Arc<NlpResources> {
    use std::sync::{Arc, OnceLock};

    static SHARED: OnceLock<Arc<NlpResources>> = OnceLock::new();
    SHARED
        .get_or_init(|| Arc::new(NlpResources::load().expect("embedded resources must load")))
        .clone()
}
