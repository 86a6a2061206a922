//! Text Engine - public entry point of the crate.
//!
//! Owns the shared NLP resources and every component built on them. Each
//! operation runs behind a boundary: an error or a panic inside the pipeline
//! is logged and answered with the documented fallback payload, so callers
//! always receive a well-formed result.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::error::AnalysisError;
use crate::insight::InsightSynthesizer;
use crate::models::{Insight, Intent, SentimentResult, SummaryReport, SurveyPayload, TextAnalysis, VoiceContext};
use crate::nlp::{KeyPhraseExtractor, NlpResources, SentimentScorer, TextNormalizer, TopicExtractor};
use crate::report::ReportBuilder;
use crate::solutions::{self, CategorySolutions, DefaultSolutions, SolutionProvider};
use crate::voice::{IntentParser, ParsedCommand};

/// Runs `f`, turning an error or a panic into `fallback`.
fn guarded<T>(
    operation: &str,
    fallback: impl FnOnce() -> T,
    f: impl FnOnce() -> Result<T, AnalysisError>,
) -> T {
    let start = Instant::now();
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => {
            debug!(operation, elapsed_us = start.elapsed().as_micros() as u64, "Operation done");
            value
        }
        Ok(Err(e)) => {
            error!(operation, error = %e, "Operation failed, returning fallback");
            fallback()
        }
        Err(_) => {
            error!(operation, "Operation panicked, returning fallback");
            fallback()
        }
    }
}

/// Main engine. Cheap to share across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TextEngine {
    config: EngineConfig,
    resources: Arc<NlpResources>,
    normalizer: TextNormalizer,
    scorer: SentimentScorer,
    topics: TopicExtractor,
    phrases: KeyPhraseExtractor,
    synthesizer: InsightSynthesizer,
    parser: IntentParser,
    reports: ReportBuilder,
}

impl TextEngine {
    /// Create an engine with the production constants.
    pub fn new() -> Result<Self, AnalysisError> {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom counts. The configuration is validated
    /// and the bundled resources are loaded once.
    pub fn with_config(config: EngineConfig) -> Result<Self, AnalysisError> {
        let config = config.validated()?;
        let resources = Arc::new(NlpResources::load()?);
        Ok(Self::with_resources(resources, config))
    }

    /// Create an engine over already loaded resources.
    pub fn with_resources(resources: Arc<NlpResources>, config: EngineConfig) -> Self {
        info!(?config, "Text engine ready");
        Self {
            normalizer: TextNormalizer::new(resources.clone()),
            scorer: SentimentScorer::new(resources.clone()),
            topics: TopicExtractor::from_config(&config),
            phrases: KeyPhraseExtractor::new(resources.clone()),
            synthesizer: InsightSynthesizer::new(resources.clone(), &config),
            parser: IntentParser::new(resources.clone(), &config),
            reports: ReportBuilder::new(resources.clone(), &config),
            resources,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resources(&self) -> &Arc<NlpResources> {
        &self.resources
    }

    /// Lowercased, punctuation-free, stop-word-free lemmas joined by spaces.
    pub fn normalize(&self, text: &str) -> String {
        guarded("normalize", String::new, || Ok(self.normalizer.normalize(text)))
    }

    /// Sentiment of `text`. Falls back to neutral.
    pub fn sentiment(&self, text: &str) -> SentimentResult {
        guarded("sentiment", SentimentResult::neutral, || Ok(self.scorer.score(text)))
    }

    /// Up to `k` topic labels over `texts`. Fails on `k == 0`.
    pub fn extract_topics(&self, texts: &[String], k: usize) -> Result<Vec<String>, AnalysisError> {
        match catch_unwind(AssertUnwindSafe(|| self.topics.extract_topics(texts, k))) {
            Ok(result) => result,
            Err(_) => {
                error!(operation = "extract_topics", "Operation panicked");
                Err(AnalysisError::Internal("Topic extraction panicked".to_string()))
            }
        }
    }

    /// Up to `n` key phrases of `text`.
    pub fn extract_phrases(&self, text: &str, n: usize) -> Vec<String> {
        guarded("extract_phrases", Vec::new, || Ok(self.phrases.extract_phrases(text, n)))
    }

    /// Insight over comments and scores. Falls back to [`Insight::fallback`].
    pub fn synthesize(&self, texts: &[String], scores: &[f64]) -> Insight {
        guarded("synthesize", Insight::fallback, || {
            let raw = SurveyPayload::from_parts(texts, scores).raw_text()?;
            self.synthesizer.synthesize(texts, scores, &raw)
        })
    }

    /// Insight over a raw ingestion payload.
    pub fn synthesize_payload(&self, payload: &SurveyPayload) -> Insight {
        guarded("synthesize_payload", Insight::fallback, || {
            let raw = payload.raw_text()?;
            self.synthesizer
                .synthesize(&payload.texts(), &payload.scores(), &raw)
        })
    }

    /// Analysis of a single answer. Falls back to [`TextAnalysis::fallback`].
    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        guarded("analyze_text", TextAnalysis::fallback, || {
            self.synthesizer.analyze_text(text)
        })
    }

    /// Intent of a voice transcript. Falls back to [`Intent::fallback`].
    pub fn parse_voice_command(&self, transcript: &str, context: Option<&VoiceContext>) -> Intent {
        guarded("parse_voice_command", Intent::fallback, || {
            Ok(self.parser.parse(transcript, context))
        })
    }

    /// Intent plus keywords and entity slots.
    pub fn parse_voice_command_detailed(
        &self,
        transcript: &str,
        context: Option<&VoiceContext>,
    ) -> ParsedCommand {
        guarded(
            "parse_voice_command_detailed",
            || ParsedCommand {
                intent: Intent::fallback(),
                keywords: Vec::new(),
                entities: Default::default(),
            },
            || Ok(self.parser.parse_detailed(transcript, context)),
        )
    }

    /// Summary report of a payload. Falls back to [`SummaryReport::fallback`].
    pub fn summary_report(&self, payload: &SurveyPayload) -> SummaryReport {
        guarded("summary_report", SummaryReport::fallback, || {
            self.reports.summary_report(payload)
        })
    }

    /// Three suggestions for `category` from the fixed table.
    pub fn solutions(&self, category: &str, company: Option<&str>) -> [String; 3] {
        self.solutions_with(&DefaultSolutions, category, company)
    }

    /// Three suggestions for `category` from `provider`.
    pub fn solutions_with<P: SolutionProvider + ?Sized>(
        &self,
        provider: &P,
        category: &str,
        company: Option<&str>,
    ) -> [String; 3] {
        let fallback = || DefaultSolutions::table(category);
        guarded("solutions", fallback, || {
            Ok(solutions::three_solutions(provider, category, company))
        })
    }

    /// Suggestions for every category.
    pub fn solutions_for_company<P: SolutionProvider + ?Sized>(
        &self,
        provider: &P,
        company: &str,
    ) -> Vec<CategorySolutions> {
        guarded(
            "solutions_for_company",
            || solutions::solutions_for_company(&DefaultSolutions, company),
            || Ok(solutions::solutions_for_company(provider, company)),
        )
    }
}
