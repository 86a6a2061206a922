//! Improvement suggestions per leadership category.
//!
//! The remote generator that normally writes these suggestions lives outside
//! this crate. [`SolutionProvider`] is its seam; [`DefaultSolutions`] is the
//! fixed table used when it is absent or fails. Whatever the provider
//! returns, callers always receive exactly three suggestions.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AnalysisError;

/// The five categories, in reporting order.
pub const CATEGORIES: [&str; 5] = [
    "strategic-clarity",
    "relentless-focus",
    "disciplined-execution",
    "scalable-talent",
    "energized-culture",
];

/// Category used when an unknown one is requested.
const DEFAULT_CATEGORY: &str = "strategic-clarity";

const DEFAULT_TABLE: [(&str, [&str; 3]); 5] = [
    (
        "strategic-clarity",
        [
            "Create a one-page strategic plan that every employee can understand and reference",
            "Schedule monthly strategic alignment sessions with all department heads",
            "Implement a strategic objectives dashboard visible to all team members",
        ],
    ),
    (
        "relentless-focus",
        [
            "Institute a project prioritization matrix that aligns with strategic objectives",
            "Conduct weekly focus review meetings to eliminate low-value activities",
            "Use time-tracking analytics to identify and reduce time spent on non-core activities",
        ],
    ),
    (
        "disciplined-execution",
        [
            "Implement a structured accountability framework with clear owners for each deliverable",
            "Establish a regular cadence of execution reviews with predefined metrics",
            "Create a recognition program specifically for execution excellence",
        ],
    ),
    (
        "scalable-talent",
        [
            "Develop skill matrices for each role with clear development pathways",
            "Implement quarterly capability assessments tied to growth objectives",
            "Create cross-functional mentoring pairs to accelerate knowledge transfer",
        ],
    ),
    (
        "energized-culture",
        [
            "Launch a structured employee feedback program with action tracking",
            "Establish team-level culture champions with specific improvement metrics",
            "Create regular team-building activities aligned with company values",
        ],
    ),
];

/// Source of improvement suggestions.
pub trait SolutionProvider {
    /// Suggestions for `category`, optionally tailored to `company`.
    /// May return any number of lines; callers trim or pad to three.
    fn solutions_for(
        &self,
        category: &str,
        company: Option<&str>,
    ) -> Result<Vec<String>, AnalysisError>;
}

/// The fixed fallback table
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSolutions;

impl DefaultSolutions {
    /// The three fixed suggestions for `category`.
    pub fn table(category: &str) -> [String; 3] {
        let row = DEFAULT_TABLE
            .iter()
            .find(|(name, _)| *name == category)
            .or_else(|| DEFAULT_TABLE.iter().find(|(name, _)| *name == DEFAULT_CATEGORY))
            .map(|(_, row)| *row)
            .unwrap_or(DEFAULT_TABLE[0].1);
        row.map(str::to_string)
    }
}

impl SolutionProvider for DefaultSolutions {
    fn solutions_for(
        &self,
        category: &str,
        _company: Option<&str>,
    ) -> Result<Vec<String>, AnalysisError> {
        Ok(Self::table(category).to_vec())
    }
}

/// Suggestions for one category, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySolutions {
    pub category: String,
    pub solutions: [String; 3],
}

/// Exactly three suggestions: the provider's lines, blank lines dropped,
/// truncated or padded from the fixed table. A failing provider yields the
/// fixed table.
pub fn three_solutions<P: SolutionProvider + ?Sized>(
    provider: &P,
    category: &str,
    company: Option<&str>,
) -> [String; 3] {
    let fallback = DefaultSolutions::table(category);

    let lines = match provider.solutions_for(category, company) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(category, error = %e, "Solution provider failed, using defaults");
            return fallback;
        }
    };

    let mut picked: Vec<String> = lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .take(3)
        .collect();
    let missing = 3 - picked.len();
    picked.extend(fallback.iter().take(missing).cloned());

    picked.try_into().unwrap_or(fallback)
}

/// Suggestions for every category, in [`CATEGORIES`] order.
pub fn solutions_for_company<P: SolutionProvider + ?Sized>(
    provider: &P,
    company: &str,
) -> Vec<CategorySolutions> {
    CATEGORIES
        .iter()
        .map(|category| CategorySolutions {
            category: category.to_string(),
            solutions: three_solutions(provider, category, Some(company)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Result<Vec<String>, AnalysisError>);

    impl SolutionProvider for Scripted {
        fn solutions_for(&self, _: &str, _: Option<&str>) -> Result<Vec<String>, AnalysisError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_default_table() {
        let solutions = three_solutions(&DefaultSolutions, "scalable-talent", None);
        assert_eq!(
            solutions[0],
            "Develop skill matrices for each role with clear development pathways"
        );
    }

    #[test]
    fn test_unknown_category_uses_strategic_clarity() {
        assert_eq!(
            DefaultSolutions::table("made-up"),
            DefaultSolutions::table("strategic-clarity")
        );
    }

    #[test]
    fn test_short_answer_is_padded_from_table() {
        let provider = Scripted(Ok(vec!["Run a survey".to_string(), "   ".to_string()]));
        let solutions = three_solutions(&provider, "energized-culture", Some("Acme"));
        assert_eq!(solutions[0], "Run a survey");
        assert_eq!(
            solutions[1],
            "Launch a structured employee feedback program with action tracking"
        );
        assert_eq!(
            solutions[2],
            "Establish team-level culture champions with specific improvement metrics"
        );
    }

    #[test]
    fn test_long_answer_is_truncated() {
        let lines = (1..=5).map(|i| format!("Idea {}", i)).collect();
        let solutions = three_solutions(&Scripted(Ok(lines)), "relentless-focus", None);
        assert_eq!(solutions, ["Idea 1", "Idea 2", "Idea 3"].map(str::to_string));
    }

    #[test]
    fn test_failing_provider_falls_back() {
        let provider = Scripted(Err(AnalysisError::Unavailable("offline".to_string())));
        assert_eq!(
            three_solutions(&provider, "disciplined-execution", None),
            DefaultSolutions::table("disciplined-execution")
        );
    }

    #[test]
    fn test_company_report_covers_all_categories() {
        let report = solutions_for_company(&DefaultSolutions, "Acme");
        let categories: Vec<&str> = report.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, CATEGORIES.to_vec());
    }
}
