mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use senti_ai::SequenceClassifier;
use senti_client::SentimentClient;
use senti_core::{Analyzer, Config, LabelMap};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{ClassifyArgs, Cli, Command, ProbeArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    info!("senti v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Serve(args) => {
            let config = args.into_config();
            let analyzer = load_analyzer(&config).await?;
            senti_server::serve(&config, analyzer).await
        }
        Command::Classify(args) => classify(args).await,
        Command::Probe(args) => probe(args).await,
    }
}

/// Resolve and load the model once, then wrap it with the label table.
async fn load_analyzer(config: &Config) -> anyhow::Result<Analyzer> {
    let labels = match &config.label_map {
        Some(path) => LabelMap::from_file(path)?,
        None => LabelMap::default(),
    };
    info!(entries = labels.len(), fallback = %labels.fallback(), "label table ready");

    let files = senti_ai::resolve_model(&config.model_id)
        .await
        .with_context(|| format!("resolving model {}", config.model_id))?;
    let classifier = tokio::task::spawn_blocking(move || SequenceClassifier::load(&files))
        .await?
        .context("loading sentiment model")?;

    Ok(Analyzer::new(Arc::new(classifier), labels))
}

async fn classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let config = args.model.into_config();
    let analyzer = load_analyzer(&config).await?;
    let text = args.text;
    let analysis = tokio::task::spawn_blocking(move || analyzer.analyze(&text)).await??;

    if args.json {
        println!("{}", serde_json::to_string(&analysis)?);
    } else {
        println!(
            "{}\t{:.4}\t{}",
            analysis.label, analysis.score, analysis.normalized_label
        );
    }
    Ok(())
}

async fn probe(args: ProbeArgs) -> anyhow::Result<()> {
    let client = SentimentClient::new(args.url)?;
    let prediction = client.analyze(&args.text).await?;
    println!("{}\t{:.4}", prediction.label, prediction.score);
    Ok(())
}
