//! # Qualia Predict — the mask-predictor collaborator
//!
//! The predictor-driven strategies render a prompt with one blank marker
//! and ask an external masked-language model for ranked fill-ins. This
//! crate owns the [`MaskPredictor`] trait, the blank-marker utilities, the
//! recursive multi-blank expansion, and an HTTP client implementation.
//!
//! The model itself runs elsewhere; the contract is only: given a prompt
//! containing at least one blank marker, return fill candidates for the
//! *first* blank with probabilities that sum to ≈1 over the returned top-N.

pub mod blanks;
pub mod error;
pub mod http;
pub mod predictor;

pub use blanks::{MAX_BLANKS, count_blanks, fill_all_blanks, fill_first_blank, predict_all};
pub use error::PredictError;
pub use http::HttpMaskPredictor;
pub use predictor::{MaskPredictor, Prediction, normalize_probabilities};
