//! Engine constants.
//!
//! Every count the analysis pipeline relies on lives here so that tests can
//! substitute smaller fixtures. The [`Default`] values are the production
//! constants and must not drift: callers compare outputs across versions.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AnalysisError;

/// Represents the tunable counts of the text intelligence engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EngineConfig {
    /// Topics fitted when synthesizing a survey insight.
    #[validate(range(min = 1))]
    pub insight_topics: usize,
    /// Topics ("themes") fitted for a single-text analysis.
    #[validate(range(min = 1))]
    pub analysis_topics: usize,
    /// Key phrases returned per text.
    #[validate(range(min = 1))]
    pub key_phrases: usize,
    /// Vocabulary cap of the TF-IDF vectorizer.
    #[validate(range(min = 1))]
    pub max_features: usize,
    /// Terms joined into a topic label.
    #[validate(range(min = 1))]
    pub terms_per_topic: usize,
    /// Seed of the topic model initialisation.
    pub topic_seed: u64,
    /// Variational EM passes of the topic model.
    #[validate(range(min = 1))]
    pub topic_iterations: usize,
    /// Frequent transcript tokens appended to the voice keyword list.
    #[validate(range(min = 1))]
    pub frequent_tokens: usize,
    /// Seed of the placeholder percentages in summary reports.
    pub report_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            insight_topics: 3,
            analysis_topics: 2,
            key_phrases: 5,
            max_features: 100,
            terms_per_topic: 4,
            topic_seed: 42,
            topic_iterations: 10,
            frequent_tokens: 5,
            report_seed: 42,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration, returning it unchanged on success.
    pub fn validated(self) -> Result<Self, AnalysisError> {
        self.validate()?;
        Ok(self)
    }
}
