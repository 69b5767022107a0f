//! Blank-input guard, truncation, and label normalization around a classifier.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{Classifier, InferenceError};
use crate::labels::LabelMap;
use crate::sentiment::Sentiment;

/// Characters of input forwarded to the classifier; the rest is dropped.
pub const MAX_INPUT_CHARS: usize = 1000;

/// Result of one analysis: `(label, score, normalized_label)`.
///
/// `normalized_label` always equals `label`; both fields exist because the
/// endpoint exposes three output fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub label: Sentiment,
    pub score: f64,
    pub normalized_label: Sentiment,
}

impl Analysis {
    pub fn new(label: Sentiment, score: f64) -> Self {
        Self {
            label,
            score,
            normalized_label: label,
        }
    }

    /// Output for empty or whitespace-only input.
    pub fn blank() -> Self {
        Self::new(Sentiment::Neutral, 0.0)
    }

    pub fn into_tuple(self) -> (Sentiment, f64, Sentiment) {
        (self.label, self.score, self.normalized_label)
    }
}

/// True for empty or whitespace-only text.
///
/// The information separators U+001C..=U+001F count as whitespace too.
pub fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Borrow at most the first `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Sentiment analyzer: a shared classifier plus the label table.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn Classifier>,
    labels: LabelMap,
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn Classifier>, labels: LabelMap) -> Self {
        Self { classifier, labels }
    }

    /// Analyzer with the built-in label table.
    pub fn with_default_labels(classifier: Arc<dyn Classifier>) -> Self {
        Self::new(classifier, LabelMap::default())
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Classify `text` and normalize the top-ranked label.
    ///
    /// Blank input short-circuits to `(NEUTRAL, 0.0, NEUTRAL)` without calling
    /// the classifier. Classifier errors are returned unchanged.
    pub fn analyze(&self, text: &str) -> Result<Analysis, InferenceError> {
        if is_blank(text) {
            return Ok(Analysis::blank());
        }

        let input = truncate_chars(text, MAX_INPUT_CHARS);
        let top = self
            .classifier
            .classify(input)?
            .into_iter()
            .next()
            .ok_or(InferenceError::NoPredictions)?;

        let label = self.labels.normalize(&top.label);
        debug!(
            chars = input.chars().count(),
            raw_label = %top.label,
            %label,
            score = top.score,
            "analyzed text"
        );
        Ok(Analysis::new(label, top.score))
    }
}
