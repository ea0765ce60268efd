use crate::{dc_err, error::ClassifierError};

/// How many breeds are reported by default
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probability: f32,
}

impl Prediction {
    pub fn percentage(&self) -> f32 {
        100.0 * self.probability
    }
}

/// Pairs every label with its probability and keeps the `n` most likely ones, most likely first.
///
/// The sort is stable, so equal probabilities keep vocabulary order. NaN sorts last.
pub fn top_n(
    vocab: &[String],
    probabilities: &[f32],
    n: usize,
) -> Result<Vec<Prediction>, ClassifierError> {
    if vocab.len() != probabilities.len() {
        return Err(dc_err!(
            "model returned {} probabilities for {} labels",
            probabilities.len(),
            vocab.len()
        ));
    }

    let mut ranked: Vec<(&String, f32)> = vocab.iter().zip(probabilities.iter().copied()).collect();
    ranked.sort_by(|(_, a), (_, b)| rank_key(*b).total_cmp(&rank_key(*a)));

    Ok(ranked
        .into_iter()
        .take(n)
        .map(|(label, probability)| Prediction {
            label: label.clone(),
            probability,
        })
        .collect())
}

// `total_cmp` places positive NaN above every number, which would put it first
fn rank_key(probability: f32) -> f32 {
    if probability.is_nan() {
        f32::NEG_INFINITY
    } else {
        probability
    }
}
