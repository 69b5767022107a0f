//! Logits → ranked predictions.

use senti_core::RawPrediction;

/// Softmax over one row of logits, then pair each probability with its label
/// and sort descending. Ties keep class-index order.
pub fn rank_logits(logits: &[f32], labels: &[String]) -> Vec<RawPrediction> {
    let probs = softmax(logits);
    let mut ranked: Vec<RawPrediction> = probs
        .into_iter()
        .zip(labels)
        .map(|(p, label)| RawPrediction::new(label.clone(), p as f64))
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Numerically stable softmax.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        exps.into_iter().map(|e| e / sum).collect()
    } else {
        exps
    }
}
