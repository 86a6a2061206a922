//! # Survey Signals Core
//!
//! Text intelligence engine for employee surveys. Fast, deterministic,
//! offline analysis of free-text answers and voice commands.
//!
//! ## Modules
//! - `nlp`: normalization, sentiment, topics, key phrases, entities
//! - `insight`: survey insight synthesis and single-text analysis
//! - `voice`: voice command intent parsing
//! - `report`: summary report with improvement areas
//! - `solutions`: per-category improvement suggestions
//! - `engine`: the public facade with fallback handling
//!
//! ```no_run
//! use survey_signals::TextEngine;
//!
//! let engine = TextEngine::new()?;
//! let intent = engine.parse_voice_command("show me engineering data", None);
//! println!("{}", intent.response);
//! # Ok::<(), survey_signals::AnalysisError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod insight;
pub mod models;
pub mod nlp;
pub mod report;
pub mod solutions;
pub mod telemetry;
pub mod voice;

pub use config::EngineConfig;
pub use engine::TextEngine;
pub use error::AnalysisError;

#[cfg(test)]
mod tests;
