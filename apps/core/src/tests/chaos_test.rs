//! Chaos Tests
//!
//! Many threads hammering one shared engine with a mix of valid and hostile
//! input. Every call must return a well-formed result and identical input
//! must give identical output regardless of interleaving.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use super::shared_engine;
use crate::models::{Action, Insight, SurveyPayload};

const HOSTILE: &[&str] = &[
    "",
    "   ",
    "!!!???...",
    "\u{0}\u{1}\u{7f}",
    "😀😀😀 great 😡",
    "ÉQUIPE très motivée, MAIS trop de réunions",
    "NOT BAD AT ALL!!!! but never so good",
    "the the the the the the the the",
    "12345 67890 3.14 99%",
    "q1 q2 q3 q4 vs compare compare",
    "{\"responses\": [null, 1, \"x\"]}",
];

#[test]
fn test_chaos_concurrent_callers() {
    let engine = shared_engine();
    let completed = Arc::new(AtomicUsize::new(0));
    let threads = 8;

    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            let engine = Arc::clone(&engine);
            let completed = Arc::clone(&completed);
            thread::spawn(move || {
                for (i, text) in HOSTILE.iter().enumerate() {
                    let texts = vec![text.to_string(); (worker + i) % 4];
                    let insight = engine.synthesize(&texts, &[worker as f64]);
                    assert!(!insight.title.is_empty());
                    assert!(!insight.tags.is_empty() && insight.tags.len() <= 3);

                    let sentiment = engine.sentiment(text);
                    assert!((0.0..=10.0).contains(&sentiment.score));

                    let intent = engine.parse_voice_command(text, None);
                    assert!(!intent.response.is_empty());

                    let analysis = engine.analyze_text(text);
                    assert!(analysis.themes.len() <= 2);

                    assert!(engine.extract_phrases(text, 3).len() <= 3);
                    let _ = engine.normalize(text);
                }
                completed.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
    assert_eq!(completed.load(Ordering::SeqCst), threads);
}

#[test]
fn test_chaos_results_are_stable_across_threads() {
    let engine = shared_engine();
    let texts: Vec<String> = vec![
        "Great managers but awful tooling".to_string(),
        "Communication improved a lot this quarter".to_string(),
        "Too many meetings, not enough focus time".to_string(),
    ];
    let expected = engine.synthesize(&texts, &[6.0, 7.0, 5.0]);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let texts = texts.clone();
            thread::spawn(move || engine.synthesize(&texts, &[6.0, 7.0, 5.0]))
        })
        .collect();

    for handle in handles {
        let insight: Insight = handle.join().expect("worker thread panicked");
        assert_eq!(insight, expected);
    }
}

#[test]
fn test_chaos_hostile_payloads() {
    let engine = shared_engine();
    for raw in [
        r#"{"responses": []}"#,
        r#"{"responses": [{}]}"#,
        r#"{"responses": [{"comments": "", "score": -3}]}"#,
        r#"{"responses": [{"questionScores": {}}]}"#,
        r#"{}"#,
    ] {
        let payload: SurveyPayload = serde_json::from_str(raw).unwrap();
        let insight = engine.synthesize_payload(&payload);
        assert!(!insight.content.is_empty(), "Empty content for {}", raw);

        let report = engine.summary_report(&payload);
        assert_eq!(report.improvement_areas.len(), 3, "Bad report for {}", raw);
    }
}

#[test]
fn test_chaos_long_transcript() {
    let engine = shared_engine();
    let transcript = "please show me the engineering numbers ".repeat(500);
    let intent = engine.parse_voice_command(&transcript, None);
    assert_eq!(intent.action, Action::Filter);
}
