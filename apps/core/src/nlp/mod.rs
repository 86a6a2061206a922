//! # NLP Module
//!
//! Deterministic text analysis building blocks. No model downloads, no network:
//! every resource is embedded and loaded once through [`NlpResources::load`].
//!
//! ## Components
//! - `normalizer`: lowercase, strip, stop-word filter, lemmatize
//! - `sentiment`: lexicon-based polarity and the 0-10 score
//! - `topics`: TF-IDF vectorizer and LDA topic labels
//! - `phrases`: noun chunks and entities ranked by frequency
//! - `entities`: rule-based entity recognizer
//! - `resources`: the shared, read-only resource bundle

pub mod entities;
pub mod lemmatizer;
pub mod lexicon;
pub mod normalizer;
pub mod phrases;
pub mod resources;
pub mod sentiment;
pub mod stopwords;
pub mod topics;

pub use entities::{Entity, EntityLabel, EntityRecognizer};
pub use lemmatizer::Lemmatizer;
pub use lexicon::SentimentLexicon;
pub use normalizer::TextNormalizer;
pub use phrases::KeyPhraseExtractor;
pub use resources::NlpResources;
pub use sentiment::SentimentScorer;
pub use stopwords::StopWords;
pub use topics::{LatentDirichletAllocation, TfidfMatrix, TfidfVectorizer, TopicExtractor};
