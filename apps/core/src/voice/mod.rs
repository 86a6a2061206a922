//! # Voice Module
//!
//! Maps a voice transcript plus UI context to a discrete action with typed
//! parameters and a confirmation sentence.
//!
//! ## Components
//! - `keywords`: fixed vocabularies and keyword extraction
//! - `rules`: the ordered action decision table
//! - `parser`: the orchestrator

pub mod keywords;
pub mod parser;
pub mod rules;

pub use parser::{EntitySlots, IntentParser, ParsedCommand};
pub use rules::{ActionRule, Utterance, RULES};
