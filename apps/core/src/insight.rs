//! Insight Synthesizer.
//!
//! Combines sentiment, topics and key phrases of a batch of survey comments
//! into a templated narrative. Also hosts the single-text analysis used for
//! one free-text answer.
//!
//! Functions here return `Result`; the fallback payloads are substituted by
//! [`crate::engine::TextEngine`], never here.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::AnalysisError;
use crate::models::{Insight, SentimentLabel, TextAnalysis};
use crate::nlp::{KeyPhraseExtractor, NlpResources, SentimentScorer, TextNormalizer, TopicExtractor};

/// Tag appended when fewer than three topics were found.
pub const FALLBACK_TAG: &str = "Survey Analysis";

const MAX_TAGS: usize = 3;

/// Stand-in for a period-over-period trend.
///
/// There is no historical data source: last quarter is assumed to be 5% below
/// the current average. Display only, never a real comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticTrend {
    pub average: f64,
    pub baseline: f64,
    /// Change from `baseline` to `average`, in percent
    pub percent: f64,
}

impl SyntheticTrend {
    pub const BASELINE_RATIO: f64 = 0.95;
    /// Used when the baseline is zero.
    pub const DEFAULT_PERCENT: f64 = 5.0;

    pub fn from_average(average: f64) -> Self {
        let baseline = Self::BASELINE_RATIO * average;
        let percent = if baseline == 0.0 {
            Self::DEFAULT_PERCENT
        } else {
            (average - baseline) / baseline * 100.0
        };
        Self {
            average,
            baseline,
            percent,
        }
    }
}

fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// One-sentence reading of a single answer.
fn analysis_sentence(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "The response indicates high satisfaction with the current processes.",
        SentimentLabel::Negative => "The response highlights concerns that should be addressed by management.",
        SentimentLabel::Neutral => "The response indicates average satisfaction with some areas for improvement.",
    }
}

/// First three topics, or all of them plus [`FALLBACK_TAG`].
fn tags_for(topics: &[String]) -> Vec<String> {
    if topics.len() >= MAX_TAGS {
        topics[..MAX_TAGS].to_vec()
    } else {
        let mut tags = topics.to_vec();
        tags.push(FALLBACK_TAG.to_string());
        tags
    }
}

/// Builds insights and single-text analyses
#[derive(Debug, Clone)]
pub struct InsightSynthesizer {
    normalizer: TextNormalizer,
    scorer: SentimentScorer,
    topics: TopicExtractor,
    phrases: KeyPhraseExtractor,
    insight_topics: usize,
    analysis_topics: usize,
    key_phrases: usize,
}

impl InsightSynthesizer {
    pub fn new(resources: Arc<NlpResources>, config: &EngineConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(resources.clone()),
            scorer: SentimentScorer::new(resources.clone()),
            topics: TopicExtractor::from_config(config),
            phrases: KeyPhraseExtractor::new(resources),
            insight_topics: config.insight_topics,
            analysis_topics: config.analysis_topics,
            key_phrases: config.key_phrases,
        }
    }

    /// Synthesize an insight from comments and scores.
    ///
    /// Topics are drawn from the comments as written. With no comments,
    /// `raw_payload` (the caller's payload in string form) is normalized and
    /// analysed instead and the response count reads "limited".
    pub fn synthesize(
        &self,
        texts: &[String],
        scores: &[f64],
        raw_payload: &str,
    ) -> Result<Insight, AnalysisError> {
        if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
            return Err(AnalysisError::InvalidInput(format!(
                "Score {} is not a finite number",
                bad
            )));
        }

        let degraded = texts.is_empty();
        let (all_text, topic_input) = if degraded {
            warn!("No comments in payload, analysing the raw payload text");
            (
                raw_payload.to_string(),
                vec![self.normalizer.normalize(raw_payload)],
            )
        } else {
            (texts.join(" "), texts.to_vec())
        };

        let trend = SyntheticTrend::from_average(average(scores));
        let sentiment = self.scorer.score(&all_text);
        let is_positive = sentiment.label == SentimentLabel::Positive;
        let topics = self.topics.extract_topics(&topic_input, self.insight_topics)?;
        let key_phrases = self.phrases.extract_phrases(&all_text, self.key_phrases);
        debug!(?key_phrases, "Key phrases");

        let responses = if degraded {
            "limited".to_string()
        } else {
            texts.len().to_string()
        };

        let content = format!(
            "Analysis based on {} survey responses:\n\
             - Overall sentiment is {} with a score of {:.1}/10\n\
             - Key topics include: {}\n\
             - Average satisfaction score is {:.1} out of 10\n",
            responses,
            sentiment.label,
            sentiment.score,
            topics.join(", "),
            trend.average
        );

        let title = if is_positive {
            format!(
                "Satisfaction has increased by {:.1}% since last quarter",
                trend.percent.abs()
            )
        } else {
            "Areas for improvement identified in recent survey data".to_string()
        };

        info!(
            responses = texts.len(),
            sentiment = %sentiment.label,
            score = sentiment.score,
            topics = topics.len(),
            "Insight synthesized"
        );

        Ok(Insight {
            title,
            content,
            tags: tags_for(&topics),
            is_positive,
        })
    }

    /// Analyse a single free-text answer.
    pub fn analyze_text(&self, text: &str) -> Result<TextAnalysis, AnalysisError> {
        let sentiment = self.scorer.score(text);
        let normalized = self.normalizer.normalize(text);
        let themes = self.topics.extract_topics(&[normalized], self.analysis_topics)?;
        let key_phrases = self.phrases.extract_phrases(text, self.key_phrases);

        debug!(sentiment = %sentiment.label, themes = themes.len(), "Text analysed");

        Ok(TextAnalysis {
            sentiment: sentiment.label,
            score: sentiment.score,
            themes,
            insights: analysis_sentence(sentiment.label).to_string(),
            key_phrases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::resources::shared_for_tests;

    fn synthesizer() -> InsightSynthesizer {
        InsightSynthesizer::new(shared_for_tests(), &EngineConfig::default())
    }

    #[test]
    fn test_synthetic_trend() {
        let trend = SyntheticTrend::from_average(8.0);
        assert!((trend.baseline - 7.6).abs() < 1e-9);
        assert!((trend.percent - 5.263_157_894_7).abs() < 1e-6);

        let zero = SyntheticTrend::from_average(0.0);
        assert_eq!(zero.percent, SyntheticTrend::DEFAULT_PERCENT);
    }

    #[test]
    fn test_tags_padding() {
        let topics: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tags_for(&topics), vec!["a", "b", "c"]);
        assert_eq!(tags_for(&topics[..1]), vec!["a", "Survey Analysis"]);
        assert_eq!(tags_for(&[]), vec!["Survey Analysis"]);
    }

    #[test]
    fn test_positive_insight() {
        let texts = vec![
            "I love the flexible schedule and the supportive managers".to_string(),
            "Great team spirit, excellent communication".to_string(),
            "The new onboarding is helpful and friendly".to_string(),
        ];
        let insight = synthesizer().synthesize(&texts, &[8.0, 9.0, 7.0], "").unwrap();

        assert!(insight.is_positive);
        assert_eq!(insight.title, "Satisfaction has increased by 5.3% since last quarter");
        assert!(insight.content.starts_with("Analysis based on 3 survey responses:\n"));
        assert!(insight.content.contains("- Overall sentiment is positive with a score of "));
        assert!(insight.content.ends_with("- Average satisfaction score is 8.0 out of 10\n"));
        assert!(!insight.tags.is_empty() && insight.tags.len() <= 3);
    }

    #[test]
    fn test_negative_insight_title() {
        let texts = vec!["Terrible communication and awful processes".to_string()];
        let insight = synthesizer().synthesize(&texts, &[], "").unwrap();
        assert!(!insight.is_positive);
        assert_eq!(insight.title, "Areas for improvement identified in recent survey data");
        assert!(insight.content.contains("Average satisfaction score is 0.0 out of 10"));
    }

    #[test]
    fn test_degraded_mode_uses_raw_payload() {
        let insight = synthesizer()
            .synthesize(&[], &[6.0], r#"{"responses":[{"score":6.0}]}"#)
            .unwrap();
        assert!(insight.content.starts_with("Analysis based on limited survey responses:"));
    }

    #[test]
    fn test_non_finite_score_is_invalid() {
        let err = synthesizer()
            .synthesize(&["ok".to_string()], &[f64::NAN], "")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn test_analyze_text() {
        let analysis = synthesizer()
            .analyze_text("The managers are great and the benefits are excellent")
            .unwrap();
        assert_eq!(analysis.sentiment, SentimentLabel::Positive);
        assert_eq!(
            analysis.insights,
            "The response indicates high satisfaction with the current processes."
        );
        assert!(analysis.themes.len() <= 2);
        assert!(analysis.key_phrases.len() <= 5);
    }
}
