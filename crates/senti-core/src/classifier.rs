//! Inference collaborator contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One ranked result from a classifier: the model's own label and its
/// confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub label: String,
    pub score: f64,
}

impl RawPrediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("classifier returned no predictions")]
    NoPredictions,
    #[error("inference failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// A text classifier producing predictions ranked by descending score.
///
/// Implementations are loaded once and shared across requests, so `classify`
/// takes `&self`; any interior state must be synchronized by the implementor.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Vec<RawPrediction>, InferenceError>;
}

impl<C: Classifier + ?Sized> Classifier for std::sync::Arc<C> {
    fn classify(&self, text: &str) -> Result<Vec<RawPrediction>, InferenceError> {
        (**self).classify(text)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, text: &str) -> Result<Vec<RawPrediction>, InferenceError> {
        (**self).classify(text)
    }
}
