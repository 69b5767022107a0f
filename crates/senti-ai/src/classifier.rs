//! ONNX Runtime sequence classification for Hugging Face sentiment models.
//!
//! Expects an exported `*ForSequenceClassification` model whose first output is
//! `logits` with shape `[batch, num_labels]`, plus its `tokenizer.json`.

use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use senti_core::{Classifier, InferenceError, RawPrediction};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::model_config::{ModelConfig, ModelFiles};
use crate::postprocess::rank_logits;

/// Token limit for XLM-RoBERTa/BERT-style encoders.
const MAX_TOKENS: usize = 512;

/// Sentiment classifier backed by an ONNX Runtime session.
///
/// Loaded once at startup and shared. `Session::run` needs exclusive access,
/// so calls are serialized through a mutex.
pub struct SequenceClassifier {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    token_type_ids: bool,
}

impl SequenceClassifier {
    /// Load a classifier from resolved model files.
    pub fn load(files: &ModelFiles) -> anyhow::Result<Self> {
        anyhow::ensure!(files.model.exists(), "model not found: {:?}", files.model);
        anyhow::ensure!(
            files.tokenizer.exists(),
            "tokenizer not found: {:?}",
            files.tokenizer
        );

        let session = Session::builder()?.commit_from_file(&files.model)?;

        // Number of classes from the logits shape; fall back to three-way sentiment.
        let num_labels = infer_num_labels(session.outputs()[0].dtype()).unwrap_or(3);
        let token_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        let config = match &files.config {
            Some(path) => ModelConfig::from_file(path)?,
            None => ModelConfig::default(),
        };
        let labels = config.labels(num_labels);

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;

        info!(
            model = %files.model.display(),
            labels = ?labels,
            token_type_ids,
            "loaded sentiment model"
        );
        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            labels,
            token_type_ids,
        })
    }

    /// Label vocabulary in class-index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn logits(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

        let seq_len = encoding.get_ids().len();
        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let shape = [1i64, seq_len as i64];

        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("onnx session mutex poisoned"))?;

        let outputs = if self.token_type_ids {
            let type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();
            let type_tensor = Tensor::from_array((shape, type_ids.into_boxed_slice()))?;
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])?
        } else {
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
            ])?
        };

        // Logits: [1, num_labels].
        let (output_shape, output_data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            dims.len() == 2 && dims[0] == 1 && dims[1] as usize == self.labels.len(),
            "unexpected logits shape: {dims:?}, expected [1, {}]",
            self.labels.len()
        );

        debug!(tokens = seq_len, "ran sentiment model");
        Ok(output_data.to_vec())
    }
}

impl Classifier for SequenceClassifier {
    fn classify(&self, text: &str) -> Result<Vec<RawPrediction>, InferenceError> {
        let logits = self.logits(text)?;
        Ok(rank_logits(&logits, &self.labels))
    }
}

/// Try to read the class count from the ONNX logits output type.
fn infer_num_labels(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}
