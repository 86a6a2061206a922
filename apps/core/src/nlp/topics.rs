//! Topic Extractor.
//!
//! TF-IDF vectorization followed by Latent Dirichlet Allocation fitted with
//! batch variational Bayes. Each fitted topic is labelled by its top-weighted
//! terms joined with spaces.
//!
//! Every call builds its own vectorizer and model; nothing is shared between
//! calls, and a fixed seed makes identical input produce identical labels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::AnalysisError;

// NOTE: expect() is acceptable here, the pattern is a literal checked by the unit tests.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: vectorizer token pattern"));

/// Inner passes per document when fitting the document-topic posterior.
const MAX_DOC_UPDATE_ITER: usize = 100;
/// Mean absolute change below which a document posterior has converged.
const MEAN_CHANGE_TOL: f64 = 1e-3;
/// Keeps the variational normalizer away from zero.
const EPS: f64 = 1e-100;

/// Document-term matrix with l2-normalized TF-IDF rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    /// Terms in column order (alphabetical)
    pub vocabulary: Vec<String>,
    /// One row per input text
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }
}

/// TF-IDF vectorizer with a vocabulary cap
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn the vocabulary from `texts` and return their TF-IDF rows.
    ///
    /// Terms are ranked by document frequency, then total frequency, then
    /// alphabetically; the top `max_features` are kept.
    pub fn fit_transform(&self, texts: &[String]) -> TfidfMatrix {
        let counts: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| {
                let mut tf = HashMap::new();
                for token in Self::tokenize(text) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut doc_freq: HashMap<&str, (usize, usize)> = HashMap::new();
        for tf in &counts {
            for (term, &count) in tf {
                let entry = doc_freq.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        let mut ranked: Vec<(&str, usize, usize)> =
            doc_freq.into_iter().map(|(t, (df, tf))| (t, df, tf)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)).then(a.0.cmp(b.0)));
        ranked.truncate(self.max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n_docs = texts.len() as f64;
        let vocabulary: Vec<String> = ranked.iter().map(|(t, _, _)| t.to_string()).collect();
        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let idf: Vec<f64> = ranked
            .iter()
            .map(|(_, df, _)| ((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, idf)| tf.get(term).copied().unwrap_or(0) as f64 * idf)
                    .collect();
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        TfidfMatrix { vocabulary, rows }
    }
}

/// Digamma function (derivative of ln Γ), for x > 0.
fn digamma(x: f64) -> f64 {
    let mut x = x;
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let f = 1.0 / (x * x);
    result + x.ln()
        - 0.5 / x
        - f * (1.0 / 12.0 - f * (1.0 / 120.0 - f * (1.0 / 252.0 - f * (1.0 / 240.0 - f / 132.0))))
}

/// `exp(E[ln p])` for a Dirichlet with parameters `params`.
fn exp_dirichlet_expectation(params: &[f64]) -> Vec<f64> {
    let total = digamma(params.iter().sum());
    params.iter().map(|p| (digamma(*p) - total).exp()).collect()
}

/// Latent Dirichlet Allocation, batch variational Bayes
#[derive(Debug, Clone)]
pub struct LatentDirichletAllocation {
    n_topics: usize,
    max_iter: usize,
    seed: u64,
}

impl LatentDirichletAllocation {
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            max_iter: 10,
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Fit the model and return the topic-term weights (`n_topics` x `n_terms`).
    ///
    /// Document and topic priors are both `1 / n_topics`.
    pub fn fit(&self, matrix: &TfidfMatrix) -> Result<Vec<Vec<f64>>, AnalysisError> {
        let n_terms = matrix.n_terms();
        if self.n_topics == 0 || n_terms == 0 {
            return Err(AnalysisError::InvalidInput(
                "Topic model needs at least one topic and one term".to_string(),
            ));
        }

        let prior = 1.0 / self.n_topics as f64;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut components: Vec<Vec<f64>> = (0..self.n_topics)
            .map(|_| (0..n_terms).map(|_| rng.gen_range(0.9..1.1)).collect())
            .collect();

        // Sparse view of each document: (term index, weight)
        let docs: Vec<Vec<(usize, f64)>> = matrix
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, w)| **w > 0.0)
                    .map(|(v, w)| (v, *w))
                    .collect()
            })
            .collect();

        for _ in 0..self.max_iter {
            let exp_topic_word: Vec<Vec<f64>> = components
                .iter()
                .map(|topic| exp_dirichlet_expectation(topic))
                .collect();

            let mut sstats = vec![vec![0.0; n_terms]; self.n_topics];

            for doc in &docs {
                if doc.is_empty() {
                    continue;
                }
                let exp_doc_topic = self.fit_document(doc, &exp_topic_word, prior, &mut rng);

                for &(v, weight) in doc {
                    let norm = normalizer(&exp_doc_topic, &exp_topic_word, v);
                    for k in 0..self.n_topics {
                        sstats[k][v] += exp_doc_topic[k] * weight / norm;
                    }
                }
            }

            for k in 0..self.n_topics {
                for v in 0..n_terms {
                    components[k][v] = prior + sstats[k][v] * exp_topic_word[k][v];
                }
            }
        }

        if components.iter().flatten().any(|w| !w.is_finite()) {
            return Err(AnalysisError::Internal(
                "Topic model diverged to non-finite weights".to_string(),
            ));
        }

        Ok(components)
    }

    /// Iterate one document's topic posterior to convergence.
    fn fit_document(
        &self,
        doc: &[(usize, f64)],
        exp_topic_word: &[Vec<f64>],
        prior: f64,
        rng: &mut StdRng,
    ) -> Vec<f64> {
        let mut gamma: Vec<f64> = (0..self.n_topics).map(|_| rng.gen_range(0.9..1.1)).collect();
        let mut exp_doc_topic = exp_dirichlet_expectation(&gamma);

        for _ in 0..MAX_DOC_UPDATE_ITER {
            let previous = gamma.clone();

            let mut weighted = vec![0.0; self.n_topics];
            for &(v, weight) in doc {
                let norm = normalizer(&exp_doc_topic, exp_topic_word, v);
                for (k, acc) in weighted.iter_mut().enumerate() {
                    *acc += weight / norm * exp_topic_word[k][v];
                }
            }
            for k in 0..self.n_topics {
                gamma[k] = exp_doc_topic[k] * weighted[k] + prior;
            }
            exp_doc_topic = exp_dirichlet_expectation(&gamma);

            let mean_change = gamma
                .iter()
                .zip(&previous)
                .map(|(a, b)| (a - b).abs())
                .sum::<f64>()
                / self.n_topics as f64;
            if mean_change < MEAN_CHANGE_TOL {
                break;
            }
        }

        exp_doc_topic
    }
}

fn normalizer(exp_doc_topic: &[f64], exp_topic_word: &[Vec<f64>], v: usize) -> f64 {
    exp_doc_topic
        .iter()
        .zip(exp_topic_word)
        .map(|(theta, beta)| theta * beta[v])
        .sum::<f64>()
        + EPS
}

/// Labels the latent topics of a batch of texts
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    max_features: usize,
    terms_per_topic: usize,
    seed: u64,
    iterations: usize,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl TopicExtractor {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_features: config.max_features,
            terms_per_topic: config.terms_per_topic,
            seed: config.topic_seed,
            iterations: config.topic_iterations,
        }
    }

    /// Fit `num_topics` topics over `texts` and label each one.
    ///
    /// Returns `min(num_topics, vocabulary size)` labels in component order;
    /// a corpus without any term yields no topics.
    pub fn extract_topics(
        &self,
        texts: &[String],
        num_topics: usize,
    ) -> Result<Vec<String>, AnalysisError> {
        if num_topics == 0 {
            return Err(AnalysisError::InvalidInput(
                "Topic count must be at least 1".to_string(),
            ));
        }

        let matrix = TfidfVectorizer::new(self.max_features).fit_transform(texts);
        if matrix.n_terms() == 0 {
            debug!(documents = texts.len(), "No vocabulary, no topics");
            return Ok(Vec::new());
        }

        let n_topics = num_topics.min(matrix.n_terms());
        let components = LatentDirichletAllocation::new(n_topics)
            .with_seed(self.seed)
            .with_max_iter(self.iterations)
            .fit(&matrix)?;

        let topics: Vec<String> = components
            .iter()
            .map(|weights| self.label(weights, &matrix.vocabulary))
            .collect();

        debug!(
            documents = texts.len(),
            vocabulary = matrix.n_terms(),
            topics = topics.len(),
            "Topics extracted"
        );

        Ok(topics)
    }

    /// Top-weighted terms, ties kept in column order.
    fn label(&self, weights: &[f64], vocabulary: &[String]) -> String {
        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by(|&a, &b| weights[b].partial_cmp(&weights[a]).unwrap_or(Ordering::Equal));

        order
            .iter()
            .take(self.terms_per_topic)
            .map(|&v| vocabulary[v].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
