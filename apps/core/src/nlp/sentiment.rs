//! Sentiment Scorer.
//!
//! Lexicon-based polarity over the *raw* text. Word order and punctuation
//! matter (negations, boosters, "but", capitals, exclamation marks), so the
//! input must never be normalized first.
//!
//! Rule set:
//! - booster words ("very", "barely", ...) shift the valence of the word they
//!   precede, damped with distance over a three-word window
//! - a negation in the same window flips and damps the valence
//! - ALL-CAPS sentiment words in mixed-case text are emphasized
//! - sentiment before "but" is halved, sentiment after it is boosted
//! - up to four "!" and multiple "?" amplify the total
//!
//! The summed valence `s` is squashed to `compound = s / sqrt(s² + 15)`.

use std::sync::Arc;

use super::resources::NlpResources;
use crate::models::{SentimentLabel, SentimentResult};

/// Compound at or above which a text is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound at or below which a text is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

/// Window of preceding words checked for boosters and negations.
const WINDOW: usize = 3;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("fully", B_INCR),
    ("greatly", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("majorly", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("so", B_INCR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("truly", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
    ("sort", B_DECR),
];

fn booster(word: &str) -> Option<f64> {
    BOOSTERS
        .iter()
        .find(|(booster, _)| *booster == word)
        .map(|(_, scalar)| *scalar)
}

fn is_negated(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

/// Python-style `str.isupper`: at least one cased char, all cased chars upper.
fn is_upper(word: &str) -> bool {
    let mut cased = word.chars().filter(|c| c.is_alphabetic()).peekable();
    cased.peek().is_some() && cased.all(char::is_uppercase)
}

/// Whitespace tokens, edge punctuation stripped unless that leaves a
/// two-character stub (keeps emoticons such as ":)" intact).
fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .filter(|token| token.chars().count() > 1)
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Map a compound polarity to its discrete label.
pub fn label_for(compound: f64) -> SentimentLabel {
    if compound >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Map a compound polarity to the 0-10 score, one decimal.
pub fn score_for(compound: f64) -> f64 {
    round_to((compound + 1.0) * 5.0, 1).clamp(0.0, 10.0)
}

/// Lexicon-based sentiment scorer
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    resources: Arc<NlpResources>,
}

impl SentimentScorer {
    pub fn new(resources: Arc<NlpResources>) -> Self {
        Self { resources }
    }

    /// Score a raw text. Total: empty input is neutral with score 5.0.
    pub fn score(&self, text: &str) -> SentimentResult {
        let words = split_words(text);
        let valences = self.valences(&words);

        if valences.is_empty() {
            return SentimentResult::neutral();
        }

        let emphasis = punctuation_emphasis(text);

        let mut total: f64 = valences.iter().sum();
        if total > 0.0 {
            total += emphasis;
        } else if total < 0.0 {
            total -= emphasis;
        }
        let compound = round_to(total / (total * total + NORMALIZATION_ALPHA).sqrt(), 4);

        // Sentiment words count one extra to compensate for neutral words
        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &valence in &valences {
            if valence > 0.0 {
                pos_sum += valence + 1.0;
            } else if valence < 0.0 {
                neg_sum += valence - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total_weight = pos_sum + neg_sum.abs() + neu_count;

        SentimentResult {
            label: label_for(compound),
            score: score_for(compound),
            positive: round_to((pos_sum / total_weight).abs(), 3),
            negative: round_to((neg_sum / total_weight).abs(), 3),
            neutral: round_to((neu_count / total_weight).abs(), 3),
            compound,
        }
    }

    /// Per-word valence after booster, negation, capitals and "but" rules.
    fn valences(&self, words: &[&str]) -> Vec<f64> {
        let lexicon = &self.resources.lexicon;
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let upper_count = words.iter().filter(|w| is_upper(w)).count();
        let cap_differential = upper_count > 0 && upper_count < words.len();

        let mut valences = Vec::with_capacity(words.len());

        for (i, word) in lowered.iter().enumerate() {
            if booster(word).is_some()
                || (word == "kind" && lowered.get(i + 1).is_some_and(|next| next == "of"))
            {
                valences.push(0.0);
                continue;
            }

            let Some(mut valence) = lexicon.get(word) else {
                valences.push(0.0);
                continue;
            };

            if cap_differential && is_upper(words[i]) {
                valence += if valence > 0.0 { C_INCR } else { -C_INCR };
            }

            for distance in 0..WINDOW {
                if i <= distance {
                    break;
                }
                let prior = i - (distance + 1);
                if lexicon.contains(&lowered[prior]) {
                    continue;
                }

                let mut shift =
                    booster_shift(words[prior], &lowered[prior], valence, cap_differential);
                if distance == 1 {
                    shift *= 0.95;
                } else if distance == 2 {
                    shift *= 0.9;
                }
                valence += shift;
                valence = negation(valence, &lowered, i, distance);
            }

            valence = least(valence, &lowered, i);
            valences.push(valence);
        }

        but_shift(&lowered, &mut valences);
        valences
    }
}

/// Shift contributed by a booster word in front of a sentiment word.
fn booster_shift(word: &str, lowered: &str, valence: f64, cap_differential: bool) -> f64 {
    let Some(mut scalar) = booster(lowered) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_differential && is_upper(word) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

/// Apply a negation found `distance + 1` words before position `i`.
fn negation(valence: f64, words: &[String], i: usize, distance: usize) -> f64 {
    let at = |offset: usize| words[i - offset].as_str();

    match distance {
        0 => {
            if is_negated(at(1)) {
                return valence * N_SCALAR;
            }
        }
        1 => {
            if at(2) == "never" && matches!(at(1), "so" | "this") {
                return valence * 1.25;
            }
            if at(2) == "without" && at(1) == "doubt" {
                return valence;
            }
            if is_negated(at(2)) {
                return valence * N_SCALAR;
            }
        }
        _ => {
            if at(3) == "never"
                && (matches!(at(2), "so" | "this") || matches!(at(1), "so" | "this"))
            {
                return valence * 1.25;
            }
            if at(3) == "without" && (at(2) == "doubt" || at(1) == "doubt") {
                return valence;
            }
            if is_negated(at(3)) {
                return valence * N_SCALAR;
            }
        }
    }
    valence
}

/// "least" in front of a word negates it, except in "at least" / "very least".
fn least(valence: f64, words: &[String], i: usize) -> f64 {
    if i > 1 && words[i - 1] == "least" && !matches!(words[i - 2].as_str(), "at" | "very") {
        valence * N_SCALAR
    } else if i == 1 && words[0] == "least" {
        valence * N_SCALAR
    } else {
        valence
    }
}

/// Halve sentiment before the first "but" and boost what follows it.
fn but_shift(words: &[String], valences: &mut [f64]) {
    let Some(pivot) = words.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, valence) in valences.iter_mut().enumerate() {
        if idx < pivot {
            *valence *= 0.5;
        } else if idx > pivot {
            *valence *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_WEIGHT,
        _ => MAX_QUESTION_EMPHASIS,
    };

    exclamations as f64 * EXCLAMATION_WEIGHT + question_emphasis
}
