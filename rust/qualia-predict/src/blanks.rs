//! Blank-marker utilities and recursive multi-blank prediction.

use qualia_patterns::BLANK;

use crate::error::PredictError;
use crate::predictor::{MaskPredictor, Prediction};

/// The maximum number of blank markers any declared prompt template uses.
pub const MAX_BLANKS: usize = 2;

/// Number of blank markers in `prompt`.
pub fn count_blanks(prompt: &str) -> usize {
    prompt.matches(BLANK).count()
}

/// Substitute `word` for the first blank marker.
pub fn fill_first_blank(prompt: &str, word: &str) -> String {
    prompt.replacen(BLANK, word, 1)
}

/// Substitute `words` for the blank markers, in order.
pub fn fill_all_blanks(prompt: &str, words: &[String]) -> String {
    let mut filled = prompt.to_string();
    for word in words {
        filled = filled.replacen(BLANK, word, 1);
    }
    filled
}

/// Predict fills for every blank in `prompt`.
///
/// A single blank is one predictor call. With more blanks, each candidate
/// for the first blank is substituted and the remainder predicted
/// recursively; the combined fill carries the deepest level's probability.
/// Each level depends on the previous level's chosen fill, and the depth
/// is bounded by [`MAX_BLANKS`].
pub async fn predict_all(
    predictor: &dyn MaskPredictor,
    prompt: &str,
) -> Result<Vec<Prediction>, PredictError> {
    let blanks = count_blanks(prompt);
    if blanks == 0 {
        return Err(PredictError::NoBlank);
    }
    if blanks > MAX_BLANKS {
        return Err(PredictError::TooManyBlanks(blanks));
    }

    let first_level = predictor.predict(prompt).await?;
    if blanks == 1 {
        return Ok(first_level);
    }

    let mut combined = Vec::new();
    for prediction in first_level {
        let Some(word) = prediction.fill.last() else {
            continue;
        };
        let filled = fill_first_blank(prompt, word);
        let deeper = Box::pin(predict_all(predictor, &filled)).await?;
        for next in deeper {
            let mut fill = prediction.fill.clone();
            fill.extend(next.fill);
            combined.push(Prediction {
                fill,
                probability: next.probability,
            });
        }
    }
    Ok(combined)
}
