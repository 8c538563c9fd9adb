//! The `qualia` binary: wires the collaborators, runs the batch, and
//! writes artifacts.
//!
//! Per-word failures are reported and the batch continues; only setup
//! errors (bad credentials file, unwritable output directory) abort the
//! process.

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qualia_nlp::LanguagePipeline;
use qualia_nlp::conllu::HttpPipeline;
use qualia_predict::HttpMaskPredictor;
use qualia_search::{DiskCache, GoogleSearchProvider, read_key_file};
use qualia_structure::{
    CreationStrategy, DebugQualiaStructure, InflectionOverrides, Metric, PredictorStrategy,
    SearchStrategy, debug_to_public,
};

use crate::cli::{QualiaCli, StrategyKind};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn gather_words(cli: &QualiaCli) -> anyhow::Result<Vec<String>> {
    let mut words = cli.words.clone();
    if let Some(path) = &cli.input_file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading word list {}", path.display()))?;
        words.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }
    Ok(words)
}

fn build_strategy(
    cli: &QualiaCli,
    pipeline: Arc<dyn LanguagePipeline>,
    client: reqwest::Client,
    overrides: InflectionOverrides,
) -> anyhow::Result<Box<dyn CreationStrategy>> {
    Ok(match cli.strategy {
        StrategyKind::Search => {
            let credentials = read_key_file(&cli.keys)?;
            let cache = DiskCache::open(&cli.cache_dir)?;
            let provider = GoogleSearchProvider::new(client, credentials)?.with_cache(cache);
            Box::new(SearchStrategy::new(
                pipeline,
                Arc::new(provider),
                Metric::from(cli.metric),
                overrides,
            ))
        }
        StrategyKind::Masked => {
            let predictor = HttpMaskPredictor::new(client, &cli.predictor_url);
            Box::new(PredictorStrategy::new(
                pipeline,
                Arc::new(predictor),
                overrides,
            ))
        }
        StrategyKind::MaskedVerified => {
            let predictor = HttpMaskPredictor::new(client, &cli.predictor_url);
            Box::new(
                PredictorStrategy::new(pipeline, Arc::new(predictor), overrides).verified(),
            )
        }
    })
}

fn artifact_path(cli: &QualiaCli, word: &str, debug_artifact: bool) -> PathBuf {
    let metric_part = match cli.strategy {
        StrategyKind::Search => format!("_{}", Metric::from(cli.metric).as_str()),
        _ => String::new(),
    };
    let debug_part = if debug_artifact { "_debug" } else { "" };
    cli.output.join(format!(
        "{word}_{}{metric_part}{debug_part}.qs",
        cli.strategy.label()
    ))
}

fn emit(cli: &QualiaCli, word: &str, json: &str, debug_artifact: bool) -> anyhow::Result<()> {
    if cli.write_to_file {
        let path = artifact_path(cli, word, debug_artifact);
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(word, path = %path.display(), "artifact written");
    } else {
        println!("{json}");
    }
    Ok(())
}

fn report(cli: &QualiaCli, word: &str, structure: &DebugQualiaStructure) -> anyhow::Result<()> {
    if cli.debug {
        let json = serde_json::to_string_pretty(structure)?;
        emit(cli, word, &json, true)?;
    }
    let public = debug_to_public(structure, cli.top_k);
    let json = serde_json::to_string_pretty(&public)?;
    emit(cli, word, &json, false)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = QualiaCli::parse();

    let words = gather_words(&cli)?;
    if words.is_empty() {
        anyhow::bail!("no subject words given; pass words or --input-file");
    }
    if cli.write_to_file {
        std::fs::create_dir_all(&cli.output)
            .with_context(|| format!("creating {}", cli.output.display()))?;
    }

    let overrides = InflectionOverrides::load(&cli.inflection_overrides)
        .with_context(|| format!("reading {}", cli.inflection_overrides.display()))?;
    let client = reqwest::Client::new();
    let pipeline: Arc<dyn LanguagePipeline> =
        Arc::new(HttpPipeline::new(client.clone(), &cli.pipeline_url));
    let strategy = build_strategy(&cli, pipeline, client, overrides)?;

    for word in &words {
        tracing::info!(word, "generating qualia structure");
        match strategy.generate(word).await {
            Ok(structure) => report(&cli, word, &structure)?,
            Err(error) if error.is_quota_exhausted() => {
                eprintln!(
                    "qualia structure of {word} failed: the request limit of every \
                     configured credential is reached"
                );
            }
            Err(error) => eprintln!("qualia structure of {word} failed: {error}"),
        }
    }

    Ok(())
}
