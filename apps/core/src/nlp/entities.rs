//! Rule-based named entity recognizer.
//!
//! Spans are found by ordered pattern passes: percentages, dates, times,
//! cardinals, then runs of capitalized words (organisations, teams, products).
//! A span claimed by an earlier pass cannot be claimed again, so "Q3 2023" is a
//! date and never a cardinal. Output is sorted by position in the text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnalysisError;

/// Entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Date,
    Time,
    Percent,
    Cardinal,
    Org,
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
            EntityLabel::Percent => "PERCENT",
            EntityLabel::Cardinal => "CARDINAL",
            EntityLabel::Org => "ORG",
        };
        write!(f, "{}", label)
    }
}

/// A labelled span of the input text (byte offsets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

const PERCENT_PATTERN: &str = r"(?i)\b\d+(?:\.\d+)?(?:%|\s?percent\b)";

const DATE_PATTERN: &str = concat!(
    r"(?i)\b(?:",
    r"\d{4}-\d{2}-\d{2}",
    r"|\d{1,2}/\d{1,2}/\d{2,4}",
    r"|(?:last|past|next|previous)\s+\d+\s+(?:days|weeks|months|quarters|years)",
    r"|(?:last|this|next|previous|past)\s+(?:week|month|quarter|year)",
    r"|(?:january|february|march|april|(?-i:May)|june|july|august|september|october|november|december)(?:\s+\d{1,2}(?:st|nd|rd|th)?)?(?:,?\s+\d{4})?",
    r"|q[1-4](?:\s+\d{4})?",
    r"|(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)",
    r"|yesterday|today|tomorrow",
    r"|(?:19|20)\d{2}",
    r")\b"
);

const TIME_PATTERN: &str = concat!(
    r"(?i)\b(?:",
    r"\d{1,2}(?::\d{2})?\s?(?:am|pm)",
    r"|\d{1,2}:\d{2}",
    r"|morning|afternoon|evening|tonight|noon|midnight",
    r")\b"
);

const CARDINAL_PATTERN: &str = concat!(
    r"(?i)\b(?:",
    r"\d+(?:[.,]\d+)*",
    r"|one|two|three|four|five|six|seven|eight|nine|ten|dozen|hundred|thousand|million",
    r")\b"
);

const PROPER_RUN_PATTERN: &str =
    r"\b(?:[A-Z][A-Za-z&]+|[A-Z]{2,})(?:\s+(?:[A-Z][A-Za-z&]+|[A-Z]{2,}))*";

/// Capitalized words that open a run without belonging to the name.
const LEADING_DETERMINERS: &[&str] = &["The ", "An ", "This ", "That ", "Our ", "Their "];

/// Ordered pattern passes over raw text
#[derive(Debug, Clone)]
pub struct EntityRecognizer {
    passes: Vec<(EntityLabel, Regex)>,
}

impl EntityRecognizer {
    /// Compile the pattern passes.
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            passes: vec![
                (EntityLabel::Percent, Regex::new(PERCENT_PATTERN)?),
                (EntityLabel::Date, Regex::new(DATE_PATTERN)?),
                (EntityLabel::Time, Regex::new(TIME_PATTERN)?),
                (EntityLabel::Cardinal, Regex::new(CARDINAL_PATTERN)?),
                (EntityLabel::Org, Regex::new(PROPER_RUN_PATTERN)?),
            ],
        })
    }

    /// Recognize entities in `text`, in text order.
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities: Vec<Entity> = Vec::new();

        for (label, pattern) in &self.passes {
            for m in pattern.find_iter(text) {
                let (start, span) = match label {
                    EntityLabel::Org => match proper_name(text, m.start(), m.as_str()) {
                        Some(found) => found,
                        None => continue,
                    },
                    _ => (m.start(), m.as_str()),
                };
                let end = start + span.len();

                let overlaps = entities.iter().any(|e| start < e.end && e.start < end);
                if overlaps {
                    continue;
                }

                entities.push(Entity {
                    text: span.to_string(),
                    label: *label,
                    start,
                    end,
                });
            }
        }

        entities.sort_by_key(|e| e.start);
        entities
    }
}

/// Trim a capitalized run down to the name it carries, if any.
///
/// A single capitalized word at the start of a sentence is just sentence case
/// and is rejected unless it is written in capitals ("HR").
fn proper_name<'t>(text: &'t str, start: usize, run: &'t str) -> Option<(usize, &'t str)> {
    let mut start = start;
    let mut run = run;
    for det in LEADING_DETERMINERS {
        if let Some(rest) = run.strip_prefix(det) {
            let name = rest.trim_start();
            start += run.len() - name.len();
            run = name;
            break;
        }
    }

    if run.chars().count() < 2 {
        return None;
    }

    let single_word = !run.contains(char::is_whitespace);
    let all_caps = run.chars().all(|c| !c.is_lowercase());
    if single_word && !all_caps && is_sentence_start(text, start) {
        return None;
    }

    Some((start, run))
}

fn is_sentence_start(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    before.is_empty() || before.ends_with(|c: char| matches!(c, '.' | '!' | '?' | ':' | ';'))
}
