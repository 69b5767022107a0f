//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use senti_core::{Config, DEFAULT_HOST, DEFAULT_MODEL_ID, DEFAULT_PORT};

#[derive(Debug, Parser)]
#[command(name = "senti", version, about = "Multilingual sentiment endpoint")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the model and serve the form and call endpoints.
    Serve(ServeArgs),
    /// Analyze one text locally and print the result.
    Classify(ClassifyArgs),
    /// Analyze one text through a running endpoint.
    Probe(ProbeArgs),
}

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Hugging Face model id or local model directory.
    #[arg(long, env = "HF_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// JSON label table replacing the built-in mapping.
    #[arg(long, env = "SENTI_LABEL_MAP")]
    pub label_map: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    pub text: String,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Base URL of the running endpoint.
    #[arg(long, default_value = "http://127.0.0.1:7860")]
    pub url: String,

    pub text: String,
}

impl ModelArgs {
    pub fn into_config(self) -> Config {
        Config {
            model_id: self.model_id,
            label_map: self.label_map,
            ..Config::default()
        }
    }
}

impl ServeArgs {
    pub fn into_config(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            ..self.model.into_config()
        }
    }
}
