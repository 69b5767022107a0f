//! Serving layer: a generated web form plus JSON call endpoints in front of a
//! shared [`Analyzer`].

mod api;
mod error;
mod form;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use senti_core::{Analyzer, Config};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

pub use api::{PredictRequest, PredictResponse};
pub use error::ApiError;
pub use form::{Component, InterfaceConfig, TITLE};

/// Paths accepting `{"data": [text]}` predictions.
pub const PREDICT_ROUTES: &[&str] = &["/api/predict", "/run/predict", "/predict"];

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
    /// Held for the duration of an inference call; requests never overlap.
    inference_slot: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            inference_slot: Arc::new(Mutex::new(())),
        }
    }
}

/// Build the router: `/` form, `/config` descriptor, prediction endpoints.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(form::index))
        .route("/config", get(form::config));
    for path in PREDICT_ROUTES {
        router = router.route(path, post(api::predict));
    }
    router.with_state(state)
}

/// Bind `config.host:config.port` and serve until Ctrl-C.
pub async fn serve(config: &Config, analyzer: Analyzer) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, model = %config.model_id, "serving sentiment form");

    axum::serve(listener, router(AppState::new(analyzer)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use senti_core::{Classifier, InferenceError, RawPrediction};
    use serde_json::{Value, json};
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    struct Stub {
        label: &'static str,
        score: f64,
        seen: StdMutex<Vec<String>>,
    }

    impl Classifier for Stub {
        fn classify(&self, text: &str) -> Result<Vec<RawPrediction>, InferenceError> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(vec![RawPrediction::new(self.label, self.score)])
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn classify(&self, _text: &str) -> Result<Vec<RawPrediction>, InferenceError> {
            Err(anyhow::anyhow!("model unavailable").into())
        }
    }

    /// Tracks how many classify calls run at once.
    #[derive(Default)]
    struct Slow {
        in_flight: AtomicUsize,
        max_seen: AtomicUsize,
    }

    impl Classifier for Slow {
        fn classify(&self, _text: &str) -> Result<Vec<RawPrediction>, InferenceError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(50));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![RawPrediction::new("POS", 0.9)])
        }
    }

    fn stub(label: &'static str, score: f64) -> Arc<Stub> {
        Arc::new(Stub {
            label,
            score,
            seen: StdMutex::new(Vec::new()),
        })
    }

    fn app(classifier: Arc<dyn Classifier>) -> Router {
        router(AppState::new(Analyzer::with_default_labels(classifier)))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn predict_normalizes_label() {
        let (status, body) = post_json(
            app(stub("LABEL_2", 0.87)),
            "/api/predict",
            json!({ "data": ["great!"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(["POSITIVE", 0.87, "POSITIVE"]));
        assert_eq!(body["is_generating"], json!(false));
        assert!(body["duration"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn every_predict_route_answers() {
        for path in PREDICT_ROUTES {
            let (status, body) =
                post_json(app(stub("neg", 0.6)), path, json!({ "data": ["terrible"] })).await;
            assert_eq!(status, StatusCode::OK, "route {path}");
            assert_eq!(body["data"], json!(["NEGATIVE", 0.6, "NEGATIVE"]), "route {path}");
        }
    }

    #[tokio::test]
    async fn blank_and_null_input_are_neutral() {
        let s = stub("POS", 0.9);
        for input in [json!(""), json!("   "), Value::Null] {
            let (status, body) =
                post_json(app(s.clone()), "/predict", json!({ "data": [input] })).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"], json!(["NEUTRAL", 0.0, "NEUTRAL"]));
        }
        assert!(s.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn long_input_is_truncated_before_inference() {
        let s = stub("POS", 0.9);
        let text = "x".repeat(1500);
        let (status, _) =
            post_json(app(s.clone()), "/run/predict", json!({ "data": [text] })).await;
        assert_eq!(status, StatusCode::OK);
        let seen = s.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 1000);
    }

    #[tokio::test]
    async fn missing_input_is_bad_request() {
        let (status, body) =
            post_json(app(stub("POS", 0.9)), "/api/predict", json!({ "data": [] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("one input"));

        let (status, _) =
            post_json(app(stub("POS", 0.9)), "/api/predict", json!({ "data": [42] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            post_json(app(stub("POS", 0.9)), "/api/predict", json!({ "text": "hi" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn classifier_failure_is_server_error() {
        let (status, body) =
            post_json(app(Arc::new(Failing)), "/api/predict", json!({ "data": ["hi"] })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("model unavailable"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn inference_calls_never_overlap() {
        let slow = Arc::new(Slow::default());
        let app = app(slow.clone());
        let body = json!({ "data": ["hello"] });
        let (a, b, c) = tokio::join!(
            post_json(app.clone(), "/api/predict", body.clone()),
            post_json(app.clone(), "/run/predict", body.clone()),
            post_json(app, "/predict", body),
        );
        for (status, body) in [a, b, c] {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"], json!(["POSITIVE", 0.9, "POSITIVE"]));
        }
        assert_eq!(slow.max_seen.load(Ordering::SeqCst), 1);
        assert_eq!(slow.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn index_serves_form() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app(stub("POS", 0.9)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Enter text"));
        assert!(html.contains("normalized_label"));
    }

    #[tokio::test]
    async fn config_describes_interface() {
        let request = Request::builder().uri("/config").body(Body::empty()).unwrap();
        let response = app(stub("POS", 0.9)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let config: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(config["title"], "Sentiment API");
        assert_eq!(config["allow_flagging"], "never");
        assert_eq!(config["enable_queue"], false);
        assert_eq!(
            config["inputs"][0],
            json!({"type": "textbox", "label": "Enter text", "lines": 3})
        );
        let outputs: Vec<&str> = config["outputs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["label"].as_str().unwrap())
            .collect();
        assert_eq!(outputs, vec!["label", "score", "normalized_label"]);
    }
}
