//! Answer scoring: exact match and token-set F1.

use std::collections::HashSet;

use crate::model::ScorePair;
use crate::text::normalize;

/// Round to two decimals the way the decimal formatter does: on the exact
/// binary value, ties to even (`0.125` -> `0.12`).
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// `true` iff both strings normalize to the same text.
pub fn exact_match(prediction: &str, truth: &str) -> bool {
    normalize(prediction) == normalize(truth)
}

/// Token-overlap F1 between a prediction and a reference, rounded to two
/// decimals.
///
/// Tokens are the whitespace-separated words of the normalized strings and
/// are compared as sets, so repeated words count once in the overlap while
/// the denominators keep the full token counts.
pub fn compute_f1(prediction: &str, truth: &str) -> f64 {
    let prediction = normalize(prediction);
    let truth = normalize(truth);
    let prediction_tokens: Vec<&str> = prediction.split_whitespace().collect();
    let truth_tokens: Vec<&str> = truth.split_whitespace().collect();

    if prediction_tokens.is_empty() || truth_tokens.is_empty() {
        return if prediction_tokens.is_empty() && truth_tokens.is_empty() {
            1.0
        } else {
            0.0
        };
    }

    let prediction_set: HashSet<&str> = prediction_tokens.iter().copied().collect();
    let truth_set: HashSet<&str> = truth_tokens.iter().copied().collect();
    let common = prediction_set.intersection(&truth_set).count();
    if common == 0 {
        return 0.0;
    }

    let precision = common as f64 / prediction_tokens.len() as f64;
    let recall = common as f64 / truth_tokens.len() as f64;
    round2(2.0 * precision * recall / (precision + recall))
}

/// Score a prediction against a single reference.
pub fn score(prediction: &str, truth: &str) -> ScorePair {
    ScorePair {
        exact_match: exact_match(prediction, truth),
        f1: compute_f1(prediction, truth),
    }
}

/// Score a prediction against every reference, keeping the best of each
/// metric. With no references the prediction is scored against `""`.
pub fn score_against_references<S: AsRef<str>>(prediction: &str, references: &[S]) -> ScorePair {
    if references.is_empty() {
        return score(prediction, "");
    }

    references
        .iter()
        .map(|reference| score(prediction, reference.as_ref()))
        .fold(ScorePair::default(), |best, next| ScorePair {
            exact_match: best.exact_match || next.exact_match,
            f1: best.f1.max(next.f1),
        })
}
