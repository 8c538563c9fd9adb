use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use qualia_structure::Metric;

#[derive(Debug, Parser)]
#[command(name = "qualia")]
#[command(bin_name = "qualia")]
#[command(about = "Generate qualia structures for words", long_about = None)]
pub struct QualiaCli {
    /// Subject words to generate structures for.
    #[arg(value_name = "WORD")]
    pub words: Vec<String>,

    /// File with line-separated subject words (`#` starts a comment).
    #[arg(short, long)]
    pub input_file: Option<PathBuf>,

    /// Generation strategy.
    #[arg(short = 'c', long, value_enum, default_value_t = StrategyKind::Search)]
    pub strategy: StrategyKind,

    /// Metric ranking the candidates (search strategy only).
    #[arg(short, long, value_enum, default_value_t = MetricKind::NumberOfSources)]
    pub metric: MetricKind,

    /// Maximal number of candidates per role.
    #[arg(short, long, default_value_t = 8)]
    pub top_k: usize,

    /// Write artifacts to the output directory instead of stdout.
    #[arg(short, long)]
    pub write_to_file: bool,

    /// Output directory for generated structures.
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,

    /// Additionally emit the debug structure with scores, provenance, and
    /// unresolved evidence.
    #[arg(short, long)]
    pub debug: bool,

    /// File with `<api key> <engine id>` pairs for the search provider.
    #[arg(short, long, default_value = "apiKeys")]
    pub keys: PathBuf,

    /// Lookup table for words the inflector cannot handle.
    #[arg(long, default_value = "inflections")]
    pub inflection_overrides: PathBuf,

    /// Directory memoizing provider responses.
    #[arg(long, default_value = ".search-cache")]
    pub cache_dir: PathBuf,

    /// Language pipeline endpoint (UDPipe-style `process` URL).
    #[arg(long, default_value = "http://localhost:8001/process")]
    pub pipeline_url: String,

    /// Mask predictor endpoint (predictor strategies).
    #[arg(long, default_value = "http://localhost:8002/predict")]
    pub predictor_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Extract candidates from web-search snippets.
    Search,
    /// Generate candidates with the mask predictor.
    Masked,
    /// Mask predictor plus structural verification of every fill.
    MaskedVerified,
}

impl StrategyKind {
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Search => "search",
            StrategyKind::Masked => "masked",
            StrategyKind::MaskedVerified => "masked-verified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricKind {
    NumberOfSources,
    OccurrenceInPatterns,
    WebP,
    WebJaccard,
    WebPmi,
}

impl From<MetricKind> for Metric {
    fn from(kind: MetricKind) -> Self {
        match kind {
            MetricKind::NumberOfSources => Metric::NumberOfSources,
            MetricKind::OccurrenceInPatterns => Metric::OccurrenceInPatterns,
            MetricKind::WebP => Metric::WebP,
            MetricKind::WebJaccard => Metric::WebJaccard,
            MetricKind::WebPmi => Metric::WebPmi,
        }
    }
}
