//! Test Module
//!
//! Cross-module test suite for the text engine.
//!
//! ## Test Categories
//! - `engine_tests`: facade construction, payload loading, fallbacks
//! - `insight_tests`: insight synthesis and single-text analysis end to end
//! - `voice_tests`: voice command parsing through the engine
//! - `report_tests`: summary reports over realistic payloads
//! - `chaos_test`: concurrent callers and hostile input
//! - `property_tests`: properties over generated input (proptest)

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::engine::TextEngine;
use crate::nlp::resources::shared_for_tests;

mod chaos_test;
mod report_tests;
mod voice_tests;

/// Engine over the shared test resources.
pub(crate) fn test_engine() -> TextEngine {
    TextEngine::with_resources(shared_for_tests(), EngineConfig::default())
}

/// Same, behind an `Arc` for multi-threaded tests.
pub(crate) fn shared_engine() -> Arc<TextEngine> {
    Arc::new(test_engine())
}
