//! Intent Parser.
//!
//! transcript -> keywords -> entity slots -> decision table -> [`Intent`].
//! A pure function of its inputs: the context is read for logging only and
//! never mutated.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::keywords::extract_keywords;
use super::rules::{resolve, Utterance};
use crate::config::EngineConfig;
use crate::models::{Intent, VoiceContext};
use crate::nlp::{EntityLabel, NlpResources};

/// Entity-derived slots. Informational: action resolution does not read them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySlots {
    /// Last DATE/TIME span of the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Last ORG span of the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Intent plus the intermediate signals that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub intent: Intent,
    pub keywords: Vec<String>,
    pub entities: EntitySlots,
}

/// Rule-based voice command parser
#[derive(Debug, Clone)]
pub struct IntentParser {
    resources: Arc<NlpResources>,
    frequent_tokens: usize,
}

impl IntentParser {
    pub fn new(resources: Arc<NlpResources>, config: &EngineConfig) -> Self {
        Self {
            resources,
            frequent_tokens: config.frequent_tokens,
        }
    }

    /// Parse a transcript into an intent.
    pub fn parse(&self, transcript: &str, context: Option<&VoiceContext>) -> Intent {
        self.parse_detailed(transcript, context).intent
    }

    /// Parse a transcript, keeping keywords and entity slots.
    pub fn parse_detailed(&self, transcript: &str, context: Option<&VoiceContext>) -> ParsedCommand {
        let default_context;
        let context = match context {
            Some(context) => context,
            None => {
                default_context = VoiceContext::default();
                &default_context
            }
        };
        debug!(
            view = %context.current_view,
            level = %context.current_filters.level,
            time_period = %context.current_filters.time_period,
            "Voice context"
        );

        let keywords =
            extract_keywords(transcript, &self.resources.stop_words, self.frequent_tokens);
        let entities = self.entity_slots(transcript);

        let utterance = Utterance::new(transcript, keywords);
        let (action, parameters, response) = resolve(&utterance);

        info!("Processed voice command: '{}' -> {}", transcript, action);

        ParsedCommand {
            intent: Intent {
                action,
                parameters,
                response,
            },
            keywords: utterance.keywords,
            entities,
        }
    }

    fn entity_slots(&self, transcript: &str) -> EntitySlots {
        let mut slots = EntitySlots::default();
        for entity in self.resources.recognizer.recognize(transcript) {
            match entity.label {
                EntityLabel::Date | EntityLabel::Time => slots.time = Some(entity.text),
                EntityLabel::Org => slots.department = Some(entity.text),
                EntityLabel::Percent | EntityLabel::Cardinal => {}
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, RequestType};
    use crate::nlp::resources::shared_for_tests;

    fn parser() -> IntentParser {
        IntentParser::new(shared_for_tests(), &EngineConfig::default())
    }

    #[test]
    fn test_filter_command() {
        let intent = parser().parse("filter to engineering for last month", None);
        assert_eq!(intent.action, Action::Filter);
        assert_eq!(intent.parameters.request_type, Some(RequestType::DataFilter));
        assert_eq!(intent.parameters.department.as_deref(), Some("Engineering"));
        assert_eq!(intent.parameters.time_period.as_deref(), Some("Last 30 days"));
        assert_eq!(
            intent.response,
            "Filtering data to show Engineering department for Last 30 days data"
        );
    }

    #[test]
    fn test_entity_slots_are_informational() {
        let parsed = parser().parse_detailed("Show the Platform Team data for last week", None);
        assert_eq!(parsed.entities.time.as_deref(), Some("last week"));
        assert_eq!(parsed.entities.department.as_deref(), Some("Platform Team"));
        // keyword rules decide the department, not the recognizer
        assert_eq!(parsed.intent.parameters.department, None);
        assert_eq!(parsed.intent.parameters.time_period.as_deref(), Some("Last 7 days"));
    }

    #[test]
    fn test_context_does_not_change_result() {
        let parser = parser();
        let ctx = VoiceContext {
            current_view: "history".to_string(),
            ..Default::default()
        };
        let transcript = "go to the upload page";
        assert_eq!(parser.parse(transcript, Some(&ctx)), parser.parse(transcript, None));
    }
}
