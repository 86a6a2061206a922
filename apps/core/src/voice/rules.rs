//! Action resolution as an ordered decision table.
//!
//! Each [`ActionRule`] pairs a trigger predicate with a resolver. Rules are
//! evaluated top to bottom and the first trigger that fires decides the
//! action; when none fires the utterance resolves to [`Action::Unknown`].

use crate::models::{Action, IntentParameters, RequestType};

use super::keywords::{COMPARE, FILTER, INSIGHT};

pub const UNKNOWN_RESPONSE: &str = "I'm not sure what you want. Could you rephrase that?";

/// Departments a filter can target, in priority order.
const FILTER_DEPARTMENTS: &[&str] = &["engineering", "marketing", "sales", "hr", "product"];

/// Period keyword -> time-period label, in priority order.
const TIME_PERIODS: &[(&str, &str)] = &[
    ("week", "Last 7 days"),
    ("month", "Last 30 days"),
    ("quarter", "Last 90 days"),
    ("year", "Last 12 months"),
];

/// Keywords that count as a comparable period.
const COMPARABLE_PERIODS: &[&str] = &["q1", "q2", "q3", "q4", "quarter", "month", "year"];

/// Keywords that request an insight.
const INSIGHT_TRIGGERS: &[&str] = &[INSIGHT, "summary", "analyze", COMPARE];

const NAVIGATE_PHRASES: &[&str] = &["go to", "navigate", "show me", "take me"];

/// Destination -> phrases, first group with a hit wins.
const DESTINATIONS: &[(&str, &[&str])] = &[
    ("dashboard", &["dashboard", "home", "main"]),
    ("history", &["history", "activities", "timeline"]),
    ("upload", &["upload", "import", "new survey"]),
];

const DEFAULT_DESTINATION: &str = "dashboard";

/// What the rules see of one transcript.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Lowercased transcript, punctuation kept
    pub lowered: String,
    /// Ordered keyword list
    pub keywords: Vec<String>,
}

impl Utterance {
    pub fn new(transcript: &str, keywords: Vec<String>) -> Self {
        Self {
            lowered: transcript.to_lowercase(),
            keywords,
        }
    }

    pub fn has_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k == word)
    }

    pub fn mentions(&self, phrase: &str) -> bool {
        self.lowered.contains(phrase)
    }
}

/// Parameters and confirmation sentence produced by a rule.
pub type Resolution = (IntentParameters, String);

/// One row of the decision table
pub struct ActionRule {
    pub action: Action,
    pub triggers: fn(&Utterance) -> bool,
    pub resolve: fn(&Utterance) -> Resolution,
}

/// The decision table, in priority order.
pub static RULES: [ActionRule; 3] = [
    ActionRule {
        action: Action::Filter,
        triggers: filter_triggers,
        resolve: resolve_filter,
    },
    ActionRule {
        action: Action::Insight,
        triggers: insight_triggers,
        resolve: resolve_insight,
    },
    ActionRule {
        action: Action::Navigate,
        triggers: navigate_triggers,
        resolve: resolve_navigate,
    },
];

/// Resolve an utterance against [`RULES`].
pub fn resolve(utterance: &Utterance) -> (Action, IntentParameters, String) {
    RULES
        .iter()
        .find(|rule| (rule.triggers)(utterance))
        .map(|rule| {
            let (parameters, response) = (rule.resolve)(utterance);
            (rule.action, parameters, response)
        })
        .unwrap_or_else(|| {
            (
                Action::Unknown,
                IntentParameters::default(),
                UNKNOWN_RESPONSE.to_string(),
            )
        })
}

fn filter_triggers(utterance: &Utterance) -> bool {
    utterance.has_keyword(FILTER)
}

fn resolve_filter(utterance: &Utterance) -> Resolution {
    let department = FILTER_DEPARTMENTS
        .iter()
        .find(|dept| utterance.has_keyword(dept))
        .map(|dept| capitalize(dept));

    let time_period = TIME_PERIODS
        .iter()
        .find(|(key, _)| utterance.has_keyword(key))
        .map(|(_, label)| label.to_string());

    let level = filter_level(utterance).map(str::to_string);

    let mut response = String::from("Filtering data to show ");
    if let Some(department) = &department {
        response.push_str(&format!("{} department ", department));
    }
    if let Some(time_period) = &time_period {
        response.push_str(&format!("for {} ", time_period));
    }
    if let Some(level) = &level {
        response.push_str(&format!("at {} level", level));
    }
    if response.ends_with(' ') {
        response = format!("{} data", response.trim());
    }

    let parameters = IntentParameters {
        request_type: Some(RequestType::DataFilter),
        department,
        time_period,
        level,
        ..Default::default()
    };
    (parameters, response)
}

fn filter_level(utterance: &Utterance) -> Option<&'static str> {
    if utterance.mentions("individual") {
        Some("Individual")
    } else if utterance.mentions("company") && !utterance.mentions("all") {
        Some("Company")
    } else if utterance.mentions("all") && utterance.mentions("company") {
        Some("All Companies")
    } else {
        None
    }
}

fn insight_triggers(utterance: &Utterance) -> bool {
    INSIGHT_TRIGGERS.iter().any(|t| utterance.has_keyword(t))
}

fn resolve_insight(utterance: &Utterance) -> Resolution {
    let periods: Vec<&String> = utterance
        .keywords
        .iter()
        .filter(|k| COMPARABLE_PERIODS.contains(&k.as_str()))
        .collect();

    if utterance.has_keyword(COMPARE) && periods.len() >= 2 {
        let response = format!("Comparing {} and {} data", periods[0], periods[1]);
        let parameters = IntentParameters {
            request_type: Some(RequestType::Comparison),
            period1: Some(periods[0].clone()),
            period2: Some(periods[1].clone()),
            ..Default::default()
        };
        return (parameters, response);
    }

    let parameters = IntentParameters {
        request_type: Some(RequestType::General),
        ..Default::default()
    };
    (
        parameters,
        "Generating insights for the current survey data".to_string(),
    )
}

fn navigate_triggers(utterance: &Utterance) -> bool {
    NAVIGATE_PHRASES.iter().any(|p| utterance.mentions(p))
}

fn resolve_navigate(utterance: &Utterance) -> Resolution {
    let found = DESTINATIONS
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|p| utterance.mentions(p)))
        .map(|(dest, _)| *dest);

    let (destination, response) = match found {
        Some(dest) => (dest, format!("Navigating to the {} page", dest)),
        None => (
            DEFAULT_DESTINATION,
            "Returning to the main dashboard".to_string(),
        ),
    };

    let parameters = IntentParameters {
        destination: Some(destination.to_string()),
        ..Default::default()
    };
    (parameters, response)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
