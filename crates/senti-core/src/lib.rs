pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod labels;
pub mod sentiment;

pub use analyzer::{Analysis, Analyzer, MAX_INPUT_CHARS, is_blank, truncate_chars};
pub use classifier::{Classifier, InferenceError, RawPrediction};
pub use config::{Config, DEFAULT_HOST, DEFAULT_MODEL_ID, DEFAULT_PORT};
pub use labels::{LabelMap, LabelMapError};
pub use sentiment::Sentiment;
