//! Runtime configuration, built once at startup and passed down.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// ONNX export of `cardiffnlp/twitter-xlm-roberta-base-sentiment`, shipping
/// `tokenizer.json`, `config.json` and `onnx/model.onnx`.
pub const DEFAULT_MODEL_ID: &str = "Xenova/twitter-xlm-roberta-base-sentiment";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7860;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Hugging Face model id, or a local directory holding the model files.
    pub model_id: String,
    pub host: String,
    pub port: u16,
    /// Optional JSON label table replacing the built-in one.
    pub label_map: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            label_map: None,
        }
    }
}

impl Config {
    /// Resolve `host:port` into a socket address.
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        use std::net::ToSocketAddrs;

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("resolving {}:{}", self.host, self.port))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("no address for {}:{}", self.host, self.port))
    }
}
