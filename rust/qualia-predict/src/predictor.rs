//! The predictor trait and its result type.

use async_trait::async_trait;

use crate::error::PredictError;

/// One ranked fill-in for a blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The word(s) filling the blank. A single blank predicts one word;
    /// multi-blank expansion accumulates one word per blank.
    pub fill: Vec<String>,
    /// The model's probability for this fill, re-normalized over the
    /// returned top-N.
    pub probability: f64,
}

impl Prediction {
    pub fn new(word: impl Into<String>, probability: f64) -> Self {
        Self {
            fill: vec![word.into()],
            probability,
        }
    }
}

/// An external masked-language model.
#[async_trait]
pub trait MaskPredictor: Send + Sync {
    /// Ranked fill candidates for the *first* blank marker in `prompt`,
    /// best first.
    async fn predict(&self, prompt: &str) -> Result<Vec<Prediction>, PredictError>;
}

/// Re-normalize probabilities so they sum to 1 over the returned set.
///
/// Leaves an all-zero distribution untouched.
pub fn normalize_probabilities(predictions: &mut [Prediction]) {
    let total: f64 = predictions.iter().map(|p| p.probability).sum();
    if total > 0.0 {
        for prediction in predictions {
            prediction.probability /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_sums_to_one() {
        let mut predictions = vec![
            Prediction::new("animal", 3.0),
            Prediction::new("friend", 1.0),
        ];
        normalize_probabilities(&mut predictions);
        assert!((predictions[0].probability - 0.75).abs() < 1e-9);
        assert!((predictions[1].probability - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_distribution_is_untouched() {
        let mut predictions = vec![Prediction::new("animal", 0.0)];
        normalize_probabilities(&mut predictions);
        assert_eq!(predictions[0].probability, 0.0);
    }
}
