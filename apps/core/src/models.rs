//! Data model shared with callers.
//!
//! Field names and nesting of the serialized forms are a compatibility
//! contract with the HTTP layer: `title/content/tags/isPositive` for insights
//! and `action/parameters/response` for voice intents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::AnalysisError;

/// Discrete sentiment label derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// Result of scoring one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Label derived from `compound`
    pub label: SentimentLabel,
    /// `(compound + 1) * 5`, rounded to one decimal (0.0 - 10.0)
    pub score: f64,
    /// Share of positive valence (0.0 - 1.0)
    pub positive: f64,
    /// Share of negative valence (0.0 - 1.0)
    pub negative: f64,
    /// Share of neutral tokens (0.0 - 1.0)
    pub neutral: f64,
    /// Normalized polarity (-1.0 - 1.0)
    pub compound: f64,
}

impl SentimentResult {
    /// Result for text without any sentiment-bearing token.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 5.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        }
    }
}

/// Narrative insight produced for a batch of survey responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: String,
    /// Newline-joined bullet lines
    pub content: String,
    /// At most three tags
    pub tags: Vec<String>,
    pub is_positive: bool,
}

impl Insight {
    /// The constant payload returned whenever synthesis fails.
    pub fn fallback() -> Self {
        Self {
            title: "Employee satisfaction has increased by 12% over the last quarter".to_string(),
            content: "Key factors contributing to this improvement include:\n\
                      - New flexible work policy implemented in July (mentioned in 47% of comments)\n\
                      - Leadership town halls have improved transparency scores by 18%\n\
                      - Improved onboarding process positively impacted new hire experience"
                .to_string(),
            tags: vec![
                "Positive Trend".to_string(),
                "Leadership Impact".to_string(),
                "Q3 Results".to_string(),
            ],
            is_positive: true,
        }
    }
}

/// Analysis of a single free-text answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub sentiment: SentimentLabel,
    pub score: f64,
    pub themes: Vec<String>,
    pub insights: String,
    pub key_phrases: Vec<String>,
}

impl TextAnalysis {
    /// The constant payload returned whenever single-text analysis fails.
    pub fn fallback() -> Self {
        Self {
            sentiment: SentimentLabel::Neutral,
            score: 5.0,
            themes: vec!["work environment".to_string(), "communication".to_string()],
            insights: "The response indicates average satisfaction with some areas for improvement."
                .to_string(),
            key_phrases: vec!["needs improvement".to_string(), "satisfied overall".to_string()],
        }
    }
}

/// One row handed over by the ingestion collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Per-question scores keyed by question id, in payload order
    #[serde(default, skip_serializing_if = "Option::is_none", with = "ordered_scores")]
    pub question_scores: Option<Vec<(String, f64)>>,
}

/// `questionScores` as a JSON object whose key order is kept.
///
/// A repeated key overwrites the earlier value in place.
mod ordered_scores {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt;

    struct OrderedScores(Vec<(String, f64)>);

    struct ScoresVisitor;

    impl<'de> Visitor<'de> for ScoresVisitor {
        type Value = OrderedScores;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of question id to score")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut scores: Vec<(String, f64)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((id, score)) = access.next_entry::<String, f64>()? {
                match scores.iter_mut().find(|(seen, _)| *seen == id) {
                    Some((_, existing)) => *existing = score,
                    None => scores.push((id, score)),
                }
            }
            Ok(OrderedScores(scores))
        }
    }

    impl<'de> Deserialize<'de> for OrderedScores {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(ScoresVisitor)
        }
    }

    pub fn serialize<S: Serializer>(
        scores: &Option<Vec<(String, f64)>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match scores {
            Some(scores) => {
                let mut map = serializer.serialize_map(Some(scores.len()))?;
                for (id, score) in scores {
                    map.serialize_entry(id, score)?;
                }
                map.end()
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<(String, f64)>>, D::Error> {
        Ok(Option::<OrderedScores>::deserialize(deserializer)?.map(|scores| scores.0))
    }
}

/// Raw survey payload as supplied by the ingestion collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyPayload {
    /// `None` when the `responses` key is absent, which is not the same as
    /// an empty upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<SurveyResponse>>,
}

impl SurveyPayload {
    /// Build a payload from parallel comment and score lists.
    pub fn from_parts(texts: &[String], scores: &[f64]) -> Self {
        let rows = texts.len().max(scores.len());
        let responses = (0..rows)
            .map(|i| SurveyResponse {
                comments: texts.get(i).cloned(),
                score: scores.get(i).copied(),
                ..Default::default()
            })
            .collect();
        Self::with_rows(responses)
    }

    /// Payload with the given rows.
    pub fn with_rows(rows: Vec<SurveyResponse>) -> Self {
        Self {
            responses: Some(rows),
        }
    }

    /// The response rows; empty when the key was absent.
    pub fn rows(&self) -> &[SurveyResponse] {
        self.responses.as_deref().unwrap_or_default()
    }

    /// Load a payload from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Non-empty comments, in row order.
    pub fn texts(&self) -> Vec<String> {
        self.rows()
            .iter()
            .filter_map(|r| r.comments.as_ref())
            .filter(|c| !c.is_empty())
            .cloned()
            .collect()
    }

    /// Present scores, in row order.
    pub fn scores(&self) -> Vec<f64> {
        self.rows().iter().filter_map(|r| r.score).collect()
    }

    /// Compact JSON form, used as the only text when no comments exist.
    pub fn raw_text(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One low-scoring area of a summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementArea {
    pub area: String,
    /// Share of respondents scoring the area low (0 - 100)
    pub percentage: u32,
}

/// Narrative summary of a whole survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub summary: String,
    /// Always at least three entries
    pub improvement_areas: Vec<ImprovementArea>,
    pub recommendation: String,
}

impl SummaryReport {
    /// The constant payload returned whenever report generation fails.
    pub fn fallback() -> Self {
        let area = |name: &str, percentage| ImprovementArea {
            area: name.to_string(),
            percentage,
        };
        Self {
            summary: "Based on survey responses from 243 employees across 5 departments, \
                      there's a positive correlation between work-life balance improvements \
                      and overall satisfaction scores."
                .to_string(),
            improvement_areas: vec![
                area("Communication transparency", 42),
                area("Career growth opportunities", 37),
                area("Feedback implementation", 29),
            ],
            recommendation: "Consider implementing more regular career development \
                             conversations and transparent project allocation."
                .to_string(),
        }
    }
}

/// Filters currently applied in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentFilters {
    pub level: String,
    pub time_period: String,
}

impl Default for CurrentFilters {
    fn default() -> Self {
        Self {
            level: "All Companies".to_string(),
            time_period: "Last 30 days".to_string(),
        }
    }
}

/// Caller-supplied UI state. Read-only for the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceContext {
    pub current_view: String,
    pub current_filters: CurrentFilters,
}

impl Default for VoiceContext {
    fn default() -> Self {
        Self {
            current_view: "dashboard".to_string(),
            current_filters: CurrentFilters::default(),
        }
    }
}

/// Closed set of actions a transcript can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Filter,
    Insight,
    Navigate,
    Unknown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Filter => "filter",
            Action::Insight => "insight",
            Action::Navigate => "navigate",
            Action::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Kind of request carried in the `type` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    DataFilter,
    Comparison,
    General,
}

/// Typed parameter slots. A `None` slot was not mentioned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentParameters {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period2: Option<String>,
}

impl IntentParameters {
    pub fn is_empty(&self) -> bool {
        *self == IntentParameters::default()
    }
}

/// Parsed voice command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub action: Action,
    pub parameters: IntentParameters,
    /// Confirmation sentence read back to the user
    pub response: String,
}

impl Intent {
    /// The constant payload returned whenever parsing fails.
    pub fn fallback() -> Self {
        Self {
            action: Action::Unknown,
            parameters: IntentParameters::default(),
            response: "I'm sorry, I couldn't understand that command. Please try again."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_field_names() {
        let json = serde_json::to_value(Insight::fallback()).unwrap();
        assert!(json.get("title").is_some());
        assert!(json.get("content").is_some());
        assert_eq!(json["tags"].as_array().unwrap().len(), 3);
        assert_eq!(json["isPositive"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_intent_empty_parameters_serialize_as_empty_object() {
        let json = serde_json::to_value(Intent::fallback()).unwrap();
        assert_eq!(json["action"], "unknown");
        assert_eq!(json["parameters"], serde_json::json!({}));
    }

    #[test]
    fn test_intent_parameter_names() {
        let params = IntentParameters {
            request_type: Some(RequestType::DataFilter),
            time_period: Some("Last 7 days".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["type"], "data_filter");
        assert_eq!(json["timePeriod"], "Last 7 days");
        assert!(json.get("department").is_none());
    }

    #[test]
    fn test_voice_context_partial_json() {
        let ctx: VoiceContext = serde_json::from_str(r#"{"currentView": "history"}"#).unwrap();
        assert_eq!(ctx.current_view, "history");
        assert_eq!(ctx.current_filters.level, "All Companies");
        assert_eq!(ctx.current_filters.time_period, "Last 30 days");
    }

    #[test]
    fn test_payload_extraction() {
        let payload: SurveyPayload = serde_json::from_str(
            r#"{"responses": [
                {"comments": "Great team", "score": 8},
                {"comments": "", "score": 6},
                {"score": 7, "departmentId": "eng"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(payload.texts(), vec!["Great team".to_string()]);
        assert_eq!(payload.scores(), vec![8.0, 6.0, 7.0]);
    }

    #[test]
    fn test_summary_report_field_names() {
        let json = serde_json::to_value(SummaryReport::fallback()).unwrap();
        assert_eq!(json["improvementAreas"][0]["area"], "Communication transparency");
        assert_eq!(json["improvementAreas"][0]["percentage"], 42);
        assert!(json["summary"].as_str().unwrap().contains("243 employees across 5 departments, there's"));
    }

    #[test]
    fn test_payload_from_parts_pads_shorter_side() {
        let payload = SurveyPayload::from_parts(&["a".to_string()], &[1.0, 2.0]);
        assert_eq!(payload.rows().len(), 2);
        assert_eq!(payload.rows()[1].comments, None);
        assert_eq!(payload.rows()[1].score, Some(2.0));
    }

    #[test]
    fn test_question_scores_keep_payload_order() {
        let response: SurveyResponse = serde_json::from_str(
            r#"{"questionScores": {"q2": 4, "q10": 7, "q1": 2, "q2": 5}}"#,
        )
        .unwrap();
        assert_eq!(
            response.question_scores,
            Some(vec![
                ("q2".to_string(), 5.0),
                ("q10".to_string(), 7.0),
                ("q1".to_string(), 2.0),
            ])
        );

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"questionScores":{"q2":5.0,"q10":7.0,"q1":2.0}}"#);

        let null: SurveyResponse = serde_json::from_str(r#"{"questionScores": null}"#).unwrap();
        assert_eq!(null.question_scores, None);
    }

    #[test]
    fn test_absent_responses_differ_from_empty() {
        let absent: SurveyPayload = serde_json::from_str("{}").unwrap();
        let empty: SurveyPayload = serde_json::from_str(r#"{"responses": []}"#).unwrap();
        assert_eq!(absent.responses, None);
        assert_eq!(empty.responses, Some(Vec::new()));
        assert!(absent.rows().is_empty() && empty.rows().is_empty());
        assert_eq!(absent.raw_text().unwrap(), "{}");
        assert_eq!(empty.raw_text().unwrap(), r#"{"responses":[]}"#);
    }
}
