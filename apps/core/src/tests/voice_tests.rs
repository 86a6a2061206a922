//! Voice Tests
//!
//! Voice command parsing through the engine, including the JSON shape the
//! HTTP layer forwards to the front-end.

use super::test_engine;
use crate::models::{Action, CurrentFilters, RequestType, VoiceContext};
use crate::voice::rules::UNKNOWN_RESPONSE;

#[cfg(test)]
mod action_tests {
    use super::*;

    #[test]
    fn test_filter_department_and_month() {
        let intent = test_engine().parse_voice_command("filter to engineering for last month", None);
        assert_eq!(intent.action, Action::Filter);
        assert_eq!(intent.parameters.department.as_deref(), Some("Engineering"));
        assert_eq!(intent.parameters.time_period.as_deref(), Some("Last 30 days"));
    }

    #[test]
    fn test_compare_quarters() {
        let intent = test_engine().parse_voice_command("compare q1 and q3 data", None);
        assert_eq!(intent.action, Action::Insight);
        assert_eq!(intent.parameters.request_type, Some(RequestType::Comparison));
        assert_eq!(intent.parameters.period1.as_deref(), Some("q1"));
        assert_eq!(intent.parameters.period2.as_deref(), Some("q3"));
        assert_eq!(intent.response, "Comparing q1 and q3 data");
    }

    #[test]
    fn test_navigate_to_upload() {
        let intent = test_engine().parse_voice_command("take me to the upload page", None);
        assert_eq!(intent.action, Action::Navigate);
        assert_eq!(intent.parameters.destination.as_deref(), Some("upload"));
        assert_eq!(intent.response, "Navigating to the upload page");
    }

    #[test]
    fn test_gibberish_is_unknown() {
        let intent = test_engine().parse_voice_command("asdkjh qwoe", None);
        assert_eq!(intent.action, Action::Unknown);
        assert!(intent.parameters.is_empty());
        assert_eq!(intent.response, UNKNOWN_RESPONSE);
    }

    #[test]
    fn test_command_table() {
        let engine = test_engine();
        let cases = vec![
            ("display marketing for this week", Action::Filter),
            ("give me a summary", Action::Insight),
            ("analyze the results", Action::Insight),
            ("go to the dashboard", Action::Navigate),
            ("navigate to history", Action::Navigate),
            ("import a new survey", Action::Unknown),
            ("", Action::Unknown),
        ];

        for (transcript, expected) in cases {
            let intent = engine.parse_voice_command(transcript, None);
            assert_eq!(intent.action, expected, "Unexpected action for '{}'", transcript);
        }
    }

    #[test]
    fn test_filter_response_sentence() {
        let intent = test_engine().parse_voice_command("display marketing for this week", None);
        assert_eq!(
            intent.response,
            "Filtering data to show Marketing department for Last 7 days data"
        );
    }

    #[test]
    fn test_general_insight() {
        let intent = test_engine().parse_voice_command("give me a summary", None);
        assert_eq!(intent.parameters.request_type, Some(RequestType::General));
        assert_eq!(intent.response, "Generating insights for the current survey data");
    }

    #[test]
    fn test_parse_is_deterministic_across_contexts() {
        let engine = test_engine();
        let context = VoiceContext {
            current_view: "history".to_string(),
            current_filters: CurrentFilters {
                level: "Company".to_string(),
                ..Default::default()
            },
        };
        for transcript in ["compare q2 and q4", "filter to sales", "take me home"] {
            assert_eq!(
                engine.parse_voice_command(transcript, Some(&context)),
                engine.parse_voice_command(transcript, None),
                "Context changed the result for '{}'",
                transcript
            );
        }
    }
}

#[cfg(test)]
mod shape_tests {
    use super::*;

    #[test]
    fn test_intent_json_shape() {
        let intent = test_engine().parse_voice_command("compare q1 and q3 data", None);
        let json = serde_json::to_value(&intent).unwrap();

        assert_eq!(json["action"], "insight");
        assert_eq!(json["parameters"]["type"], "comparison");
        assert_eq!(json["parameters"]["period1"], "q1");
        assert_eq!(json["parameters"]["period2"], "q3");
        assert!(json["parameters"].get("department").is_none());
    }

    #[test]
    fn test_unknown_has_empty_parameters() {
        let intent = test_engine().parse_voice_command("asdkjh qwoe", None);
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["parameters"], serde_json::json!({}));
    }

    #[test]
    fn test_filter_json_uses_camel_case() {
        let intent = test_engine().parse_voice_command("filter to engineering for last month", None);
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["parameters"]["type"], "data_filter");
        assert_eq!(json["parameters"]["timePeriod"], "Last 30 days");
    }

    #[test]
    fn test_context_from_front_end_json() {
        let context: VoiceContext = serde_json::from_str(
            r#"{"currentView": "dashboard", "currentFilters": {"timePeriod": "Last 7 days", "level": "Individual"}}"#,
        )
        .unwrap();
        assert_eq!(context.current_filters.level, "Individual");

        let detailed = test_engine().parse_voice_command_detailed("show engineering data for last month", Some(&context));
        assert_eq!(detailed.intent.action, Action::Filter);
        assert!(detailed.keywords.contains(&"engineering".to_string()));
        assert_eq!(detailed.entities.time.as_deref(), Some("last month"));
    }
}
