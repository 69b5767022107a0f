//! HTTP client for a running sentiment endpoint.
//!
//! Deployments differ in where the call endpoint lives and in how results are
//! wrapped, so the client walks the known paths and accepts several response
//! shapes.

use std::time::Duration;

use senti_core::{LabelMap, MAX_INPUT_CHARS, Sentiment, is_blank, truncate_chars};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Call endpoints tried in order.
pub const ENDPOINTS: &[&str] = &["/run/predict", "/predict", "/api/predict"];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sentiment service not reachable or returned an unexpected schema at {base_url}")]
    Unreachable { base_url: String },
}

/// Label and confidence returned by the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Sentiment,
    pub score: f64,
}

impl Prediction {
    fn blank() -> Self {
        Self {
            label: Sentiment::Neutral,
            score: 0.0,
        }
    }
}

#[derive(Serialize)]
struct PredictBody<'a> {
    data: [&'a str; 1],
}

pub struct SentimentClient {
    client: reqwest::Client,
    base_url: String,
    labels: LabelMap,
}

impl SentimentClient {
    /// Create a client for the service at `base_url` (trailing slash optional).
    pub fn new(base_url: String) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(
                [(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                )]
                .into_iter()
                .collect(),
            )
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            labels: LabelMap::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Analyze `text` remotely.
    ///
    /// Blank text returns `(NEUTRAL, 0.0)` without a request. Otherwise the
    /// first 1000 characters are posted to each endpoint in [`ENDPOINTS`] until
    /// one answers with a parseable body.
    pub async fn analyze(&self, text: &str) -> Result<Prediction, ClientError> {
        if is_blank(text) {
            return Ok(Prediction::blank());
        }

        let body = PredictBody {
            data: [truncate_chars(text, MAX_INPUT_CHARS)],
        };

        for endpoint in ENDPOINTS {
            let url = format!("{}{endpoint}", self.base_url);
            debug!(url = %url, "posting prediction request");

            let resp = match self.client.post(&url).json(&body).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    warn!(url = %url, error = %e, "sentiment request failed");
                    continue;
                }
            };
            let status = resp.status();
            if !status.is_success() {
                debug!(url = %url, status = status.as_u16(), "endpoint rejected request");
                continue;
            }
            let json: Value = match resp.json().await {
                Ok(json) => json,
                Err(e) => {
                    warn!(url = %url, error = %e, "response body is not JSON");
                    continue;
                }
            };

            if let Some((label, score)) = parse_response(&json) {
                let label = self.labels.normalize(&label);
                info!(url = %url, %label, score, "sentiment received");
                return Ok(Prediction { label, score });
            }
            debug!(url = %url, "unrecognized response schema");
        }

        Err(ClientError::Unreachable {
            base_url: self.base_url.clone(),
        })
    }
}

/// Extract `(raw_label, score)` from the response shapes services return:
///
/// - `{"data": [label, score, ...]}`
/// - `{"data": [[label, score]]}`
/// - `{"data": {"label": ..., "score": ...}}`
/// - `[label, score]`
///
/// A score that is not a number reads as 0.0; a label that is neither a string
/// nor `null` rejects the body.
pub fn parse_response(json: &Value) -> Option<(String, f64)> {
    if let Some(data) = json.get("data") {
        match data {
            Value::Array(items) if items.len() >= 2 && !items[0].is_array() => {
                return read_pair(items);
            }
            Value::Array(items) if items.first().is_some_and(Value::is_array) => {
                return items[0].as_array().and_then(|inner| read_pair(inner));
            }
            Value::Object(obj) => {
                let label = match obj.get("label") {
                    Some(l) => Some(read_label(l)?),
                    None => None,
                };
                let score = obj.get("score").and_then(Value::as_f64);
                if label.is_some() || score.is_some() {
                    let label = label.unwrap_or_else(|| "NEUTRAL".into());
                    return Some((label, score.unwrap_or(0.0)));
                }
            }
            _ => {}
        }
    }

    json.as_array().and_then(|items| read_pair(items))
}

fn read_pair(items: &[Value]) -> Option<(String, f64)> {
    if items.len() < 2 {
        return None;
    }
    let label = read_label(&items[0])?;
    let score = items[1].as_f64().unwrap_or(0.0);
    Some((label, score))
}

/// A string label; `null` reads as NEUTRAL, any other type is unusable.
fn read_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some("NEUTRAL".into()),
        _ => None,
    }
}
