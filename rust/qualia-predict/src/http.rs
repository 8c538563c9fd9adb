//! HTTP predictor client.
//!
//! Speaks a small JSON protocol to a model server: the request carries the
//! prompt (with the blank marker as-is — the server translates to its
//! model's mask token) and the number of candidates wanted; the response
//! lists fills with raw probabilities, which are re-normalized here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::predictor::{MaskPredictor, Prediction, normalize_probabilities};

const DEFAULT_TOP_K: usize = 50;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    prompt: &'a str,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct PredictionWire {
    fill: Vec<String>,
    probability: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<PredictionWire>,
}

/// A [`MaskPredictor`] backed by a JSON-over-HTTP model server.
#[derive(Debug, Clone)]
pub struct HttpMaskPredictor {
    client: reqwest::Client,
    endpoint: String,
    top_k: usize,
}

impl HttpMaskPredictor {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Number of candidates requested per blank.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait]
impl MaskPredictor for HttpMaskPredictor {
    async fn predict(&self, prompt: &str) -> Result<Vec<Prediction>, PredictError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest {
                prompt,
                top_k: self.top_k,
            })
            .send()
            .await
            .map_err(|error| PredictError::Http(error.to_string()))?
            .error_for_status()
            .map_err(|error| PredictError::Http(error.to_string()))?;

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|error| PredictError::Malformed(error.to_string()))?;

        let mut predictions: Vec<Prediction> = body
            .predictions
            .into_iter()
            .map(|wire| Prediction {
                fill: wire.fill,
                probability: wire.probability,
            })
            .collect();
        normalize_probabilities(&mut predictions);
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_parses() {
        let body = r#"{
            "predictions": [
                { "fill": ["animal"], "probability": 0.6 },
                { "fill": ["friend"], "probability": 0.2 }
            ]
        }"#;
        let parsed: PredictResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.predictions.len(), 2);
        assert_eq!(parsed.predictions[0].fill, vec!["animal"]);
    }
}
