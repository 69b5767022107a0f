//! JSON call endpoint: `{"data": [text]}` → `{"data": [label, score, normalized_label]}`.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use senti_core::Sentiment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub data: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub data: (Sentiment, f64, Sentiment),
    /// Wall-clock seconds spent on the request, including time waiting for
    /// the inference slot.
    pub duration: f64,
    pub is_generating: bool,
}

impl PredictRequest {
    /// The single text input. A `null` input reads as empty text.
    fn text(self) -> Result<String, ApiError> {
        match self.data.into_iter().next() {
            Some(Value::String(s)) => Ok(s),
            Some(Value::Null) => Ok(String::new()),
            Some(other) => Err(ApiError::BadRequest(format!(
                "data[0] must be a string, got {other}"
            ))),
            None => Err(ApiError::BadRequest("data must hold one input".into())),
        }
    }
}

pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let start = Instant::now();
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let text = request.text()?;

    // No queue: one inference at a time. The slot moves into the blocking task
    // so it stays held even if the client disconnects mid-inference.
    let slot = state.inference_slot.clone().lock_owned().await;
    let analyzer = state.analyzer.clone();
    let analysis = tokio::task::spawn_blocking(move || {
        let _slot = slot;
        analyzer.analyze(&text)
    })
    .await??;

    debug!(label = %analysis.label, score = analysis.score, "prediction served");
    Ok(Json(PredictResponse {
        data: analysis.into_tuple(),
        duration: start.elapsed().as_secs_f64(),
        is_generating: false,
    }))
}
