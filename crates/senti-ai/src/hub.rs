//! Resolve a model id to local files, downloading from the Hugging Face Hub
//! into its cache when the id is not a local directory.

use std::path::{Path, PathBuf};

use hf_hub::api::tokio::{Api, ApiRepo};
use tracing::{debug, info};

use crate::model_config::ModelFiles;

/// ONNX export locations tried in order.
const MODEL_CANDIDATES: &[&str] = &["onnx/model.onnx", "model.onnx"];

/// Resolve `model_id` to local [`ModelFiles`].
///
/// A `model_id` naming an existing directory is used as-is. Anything else is
/// treated as a Hub repository id; files already in the Hub cache are not
/// downloaded again.
pub async fn resolve_model(model_id: &str) -> anyhow::Result<ModelFiles> {
    let local = Path::new(model_id);
    if local.is_dir() {
        debug!(dir = %local.display(), "using local model directory");
        return ModelFiles::in_dir(local);
    }

    info!(model_id, "resolving model from Hugging Face Hub");
    let api = Api::new()?;
    let repo = api.model(model_id.to_string());

    let tokenizer = repo
        .get("tokenizer.json")
        .await
        .map_err(|e| anyhow::anyhow!("download {model_id}/tokenizer.json: {e}"))?;
    let config = repo.get("config.json").await.ok();
    let model = fetch_first(&repo, model_id, MODEL_CANDIDATES).await?;

    info!(model = %model.display(), "model files ready");
    Ok(ModelFiles {
        model,
        tokenizer,
        config,
    })
}

async fn fetch_first(repo: &ApiRepo, model_id: &str, names: &[&str]) -> anyhow::Result<PathBuf> {
    let mut last_err = None;
    for name in names {
        match repo.get(name).await {
            Ok(path) => return Ok(path),
            Err(e) => {
                debug!(model_id, file = name, error = %e, "model file not available");
                last_err = Some(e);
            }
        }
    }
    Err(anyhow::anyhow!(
        "no ONNX export found in {model_id} (tried {names:?}): {}",
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}
