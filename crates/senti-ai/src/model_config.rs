//! Model directory layout and the label vocabulary from `config.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Paths to the files a sequence classifier is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub model: PathBuf,
    pub tokenizer: PathBuf,
    /// `config.json`; without it labels default to `LABEL_{i}`.
    pub config: Option<PathBuf>,
}

impl ModelFiles {
    /// Standard layout: `model.onnx` (or `onnx/model.onnx`), `tokenizer.json`
    /// and optionally `config.json` in one directory.
    pub fn in_dir(dir: &Path) -> anyhow::Result<Self> {
        let model = ["model.onnx", "onnx/model.onnx"]
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
            .ok_or_else(|| anyhow::anyhow!("model.onnx not found in {dir:?}"))?;
        let tokenizer = dir.join("tokenizer.json");
        anyhow::ensure!(tokenizer.exists(), "tokenizer.json not found in {dir:?}");
        let config = Some(dir.join("config.json")).filter(|p| p.exists());

        Ok(Self {
            model,
            tokenizer,
            config,
        })
    }
}

/// The parts of a Hugging Face `config.json` the classifier needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    /// Class index (as a string key, the way transformers writes it) → label.
    #[serde(default)]
    pub id2label: HashMap<String, String>,
}

impl ModelConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read {}: {e}", path.display()))?;
        Self::from_json(&json)
    }

    /// Label names for `num_labels` output classes, in class-index order.
    ///
    /// Indices missing from `id2label` get transformers' default `LABEL_{i}`.
    pub fn labels(&self, num_labels: usize) -> Vec<String> {
        (0..num_labels)
            .map(|i| {
                self.id2label
                    .get(&i.to_string())
                    .cloned()
                    .unwrap_or_else(|| format!("LABEL_{i}"))
            })
            .collect()
    }
}
