//! AI inference layer: ONNX Runtime sequence classification behind the
//! [`senti_core::Classifier`] contract.

mod model_config;
pub use model_config::{ModelConfig, ModelFiles};

mod postprocess;
pub use postprocess::rank_logits;

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub use classifier::SequenceClassifier;

#[cfg(feature = "hub")]
pub mod hub;
#[cfg(feature = "hub")]
pub use hub::resolve_model;
