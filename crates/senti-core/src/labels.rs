//! Raw label vocabulary → canonical [`Sentiment`] lookup.
//!
//! Model label vocabularies vary (`LABEL_0`, `neg`, `negative`, ...), so the
//! table and its fallback are plain data. The built-in table covers the
//! common three-class checkpoints; a JSON file can replace it at startup.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sentiment::Sentiment;

/// Built-in mapping, keys already upper-cased.
pub const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("LABEL_0", "NEGATIVE"),
    ("LABEL_1", "NEUTRAL"),
    ("LABEL_2", "POSITIVE"),
    ("NEG", "NEGATIVE"),
    ("NEU", "NEUTRAL"),
    ("POS", "POSITIVE"),
];

#[derive(Debug, Error)]
pub enum LabelMapError {
    #[error("failed to read label map {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("invalid label map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Label normalization table.
///
/// `entries` maps upper-cased raw labels to candidate names. Candidates are
/// kept as strings: a candidate that is not a canonical sentiment name, mapped
/// or not, resolves to `fallback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    entries: HashMap<String, String>,
    fallback: Sentiment,
}

/// On-disk form: `{"fallback": "NEUTRAL", "labels": {"LABEL_0": "NEGATIVE"}}`.
#[derive(Deserialize)]
struct LabelMapFile {
    #[serde(default)]
    labels: Option<HashMap<String, String>>,
    #[serde(default)]
    fallback: Option<Sentiment>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::new(
            DEFAULT_LABELS
                .iter()
                .map(|&(raw, mapped)| (raw.to_string(), mapped.to_string())),
            Sentiment::Neutral,
        )
    }
}

impl LabelMap {
    /// Build a table from `(raw, mapped)` pairs. Raw keys are upper-cased.
    pub fn new<I>(entries: I, fallback: Sentiment) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = entries
            .into_iter()
            .map(|(raw, mapped)| (raw.to_uppercase(), mapped))
            .collect();
        Self { entries, fallback }
    }

    /// Parse a table from its JSON form. Missing `labels` keeps the built-in
    /// table; missing `fallback` means `NEUTRAL`.
    pub fn from_json(json: &str) -> Result<Self, LabelMapError> {
        let file: LabelMapFile = serde_json::from_str(json)?;
        let fallback = file.fallback.unwrap_or(Sentiment::Neutral);
        Ok(match file.labels {
            Some(labels) => Self::new(labels, fallback),
            None => Self {
                fallback,
                ..Self::default()
            },
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, LabelMapError> {
        let json = std::fs::read_to_string(path).map_err(|source| LabelMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Normalize a raw collaborator label: upper-case, look up, then force
    /// anything non-canonical to the fallback.
    pub fn normalize(&self, raw: &str) -> Sentiment {
        let upper = raw.to_uppercase();
        let candidate = self.entries.get(&upper).map_or(upper.as_str(), String::as_str);
        Sentiment::parse(candidate).unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Sentiment {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
