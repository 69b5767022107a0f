//! Client against live HTTP servers on ephemeral ports.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::routing::post;
use senti_client::{ClientError, SentimentClient};
use senti_core::{Analyzer, Classifier, InferenceError, RawPrediction, Sentiment};
use serde_json::{Value, json};

struct Fixed(&'static str, f64);

impl Classifier for Fixed {
    fn classify(&self, _text: &str) -> Result<Vec<RawPrediction>, InferenceError> {
        Ok(vec![RawPrediction::new(self.0, self.1)])
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn analyzes_against_sentiment_server() {
    let analyzer = Analyzer::with_default_labels(Arc::new(Fixed("LABEL_2", 0.87)));
    let base = spawn(senti_server::router(senti_server::AppState::new(analyzer))).await;

    let client = SentimentClient::new(base).unwrap();
    let prediction = client.analyze("great!").await.unwrap();
    assert_eq!(prediction.label, Sentiment::Positive);
    assert_eq!(prediction.score, 0.87);
}

#[tokio::test]
async fn falls_through_to_later_endpoint() {
    let router = Router::new().route(
        "/api/predict",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["data"][0].as_str().unwrap().chars().count(), 1000);
            Json(json!({"data": {"label": "neg", "score": 0.6}}))
        }),
    );
    let base = spawn(router).await;

    let client = SentimentClient::new(format!("{base}/")).unwrap();
    let prediction = client.analyze(&"z".repeat(1500)).await.unwrap();
    assert_eq!(prediction.label, Sentiment::Negative);
    assert_eq!(prediction.score, 0.6);
}

#[tokio::test]
async fn unknown_label_from_service_is_neutral() {
    let router = Router::new().route(
        "/run/predict",
        post(|| async { Json(json!(["UNKNOWN_TAG", 0.4])) }),
    );
    let base = spawn(router).await;

    let prediction = SentimentClient::new(base).unwrap().analyze("ok").await.unwrap();
    assert_eq!(prediction.label, Sentiment::Neutral);
    assert_eq!(prediction.score, 0.4);
}

#[tokio::test]
async fn unexpected_schema_everywhere_is_unreachable() {
    let router = Router::new()
        .route("/run/predict", post(|| async { Json(json!({"error": "busy"})) }))
        .route("/predict", post(|| async { Json(json!({"data": ["x"]})) }));
    let base = spawn(router).await;

    let err = SentimentClient::new(base)
        .unwrap()
        .analyze("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unreachable { .. }));
}
