//! Report Tests
//!
//! Summary reports over payloads shaped like real survey uploads.

use super::test_engine;
use crate::config::EngineConfig;
use crate::engine::TextEngine;
use crate::models::SurveyPayload;
use crate::nlp::resources::shared_for_tests;

const UPLOAD: &str = r#"{
    "responses": [
        {"comments": "Terrible communication and awful planning", "score": 3, "departmentId": "eng",
         "questionScores": {"career": 6, "feedback": 4, "communication": 2, "balance": 8}},
        {"comments": "I hate the lack of feedback", "score": 4, "departmentId": "sales",
         "questionScores": {"career": 7, "feedback": 3, "communication": 3, "balance": 9}},
        {"comments": "Bad tools", "score": 2, "departmentId": "ops",
         "questionScores": {"career": 3, "feedback": 6, "communication": 4, "balance": 7}},
        {"score": 5, "departmentId": "eng"}
    ]
}"#;

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_negative_upload() {
        let payload: SurveyPayload = serde_json::from_str(UPLOAD).unwrap();
        let report = test_engine().summary_report(&payload);

        assert_eq!(
            report.summary,
            "Based on survey responses from 3 employees across 3 departments, \
             there are several areas requiring attention, particularly regarding communication and team dynamics."
        );

        // communication 3.0, feedback 4.33, career 5.33, balance 8.0
        let areas: Vec<(&str, u32)> = report
            .improvement_areas
            .iter()
            .map(|a| (a.area.as_str(), a.percentage))
            .collect();
        assert_eq!(
            areas,
            vec![
                ("Communication transparency", 100),
                ("Career growth opportunities", 66),
                ("Feedback implementation", 33),
            ]
        );
        assert_eq!(
            report.recommendation,
            "Consider implementing more regular town halls and transparent project allocation processes."
        );
    }

    #[test]
    fn test_report_json_shape() {
        let payload: SurveyPayload = serde_json::from_str(UPLOAD).unwrap();
        let json = serde_json::to_value(test_engine().summary_report(&payload)).unwrap();
        assert!(json["summary"].is_string());
        assert_eq!(json["improvementAreas"].as_array().unwrap().len(), 3);
        assert_eq!(json["improvementAreas"][0]["percentage"], 100);
        assert!(json["recommendation"].is_string());
    }

    #[test]
    fn test_comments_without_question_scores() {
        let payload = SurveyPayload::from_parts(
            &["Great people".to_string(), "Love the flexible hours".to_string()],
            &[9.0, 8.0],
        );
        let report = test_engine().summary_report(&payload);

        assert!(report
            .summary
            .starts_with("Based on survey responses from 2 employees across 5 departments, there's a positive"));
        let names: Vec<&str> = report.improvement_areas.iter().map(|a| a.area.as_str()).collect();
        assert_eq!(
            names,
            vec!["Improvement area 1", "Improvement area 2", "Improvement area 3"]
        );
        for area in &report.improvement_areas {
            assert!((20..50).contains(&area.percentage), "{:?}", area);
        }
    }

    #[test]
    fn test_tied_questions_keep_payload_order() {
        let payload: SurveyPayload = serde_json::from_str(
            r#"{"responses": [
                {"questionScores": {"q2": 4, "q1": 2}},
                {"questionScores": {"q2": 4, "q1": 6}}
            ]}"#,
        )
        .unwrap();
        let report = test_engine().summary_report(&payload);

        // Both average 4.0, so q2 stays ahead of q1
        let percentages: Vec<u32> = report.improvement_areas.iter().map(|a| a.percentage).collect();
        assert_eq!(&percentages[..2], &[100, 50]);
    }

    #[test]
    fn test_empty_responses_count_zero_employees() {
        let engine = test_engine();

        let empty: SurveyPayload = serde_json::from_str(r#"{"responses": []}"#).unwrap();
        assert!(engine
            .summary_report(&empty)
            .summary
            .starts_with("Based on survey responses from 0 employees across 5 departments"));

        let absent: SurveyPayload = serde_json::from_str("{}").unwrap();
        assert!(engine
            .summary_report(&absent)
            .summary
            .starts_with("Based on survey responses from 243 employees across 5 departments"));
    }

    #[test]
    fn test_seed_drives_placeholders() {
        let payload = SurveyPayload::default();
        let seeded = |seed| {
            let config = EngineConfig {
                report_seed: seed,
                ..Default::default()
            };
            TextEngine::with_resources(shared_for_tests(), config).summary_report(&payload)
        };

        assert_eq!(seeded(7), seeded(7));
        let runs: Vec<Vec<u32>> = (0..8)
            .map(|seed| {
                seeded(seed)
                    .improvement_areas
                    .iter()
                    .map(|a| a.percentage)
                    .collect()
            })
            .collect();
        assert!(runs.iter().any(|r| r != &runs[0]), "Seeds should vary the placeholders");
    }
}
