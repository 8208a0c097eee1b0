//! jdrank CLI - classify a job description into a role category
//!
//! # Usage
//!
//! ```bash
//! # Classify inline text with the local model
//! jdrank --text "Responsibilities include VaR calculations and stress testing."
//!
//! # Classify a file with the remote provider, as JSON
//! OPENAI_API_KEY=sk-... jdrank --file jd.txt --backend remote --json
//!
//! # Show the per-category breakdown against a custom corpus
//! jdrank --file jd.txt --explain --anchors roles.json
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::error::{ContextKind, ContextValue, ErrorKind as ClapErrorKind};
use clap::{Args, CommandFactory, Parser, ValueEnum};
use jdrank_lib::{
    anchor::AnchorSet,
    classify::Classifier,
    config::Config,
    embed::{ProviderKind, build_embedder},
    report::{Report, render_text},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jdrank")]
#[command(about = "Classify a job description by embedding similarity to role anchors")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(flatten)]
    input: Input,

    /// Embedding provider
    #[arg(short, long, value_enum, default_value_t = Backend::Local)]
    backend: Backend,

    /// Output structured JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Show all role scores and confidence values
    #[arg(short, long)]
    explain: bool,

    /// JSON anchor corpus to use instead of the built-in roles
    #[arg(long, value_name = "PATH")]
    anchors: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Input {
    /// Job description text (inline)
    #[arg(short, long, value_parser = non_blank)]
    text: Option<String>,

    /// Path to a text file containing the job description
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    /// all-MiniLM-L6-v2 via ONNX, no API key needed
    #[value(alias = "sbert")]
    Local,
    /// OpenAI embeddings API, requires OPENAI_API_KEY
    #[value(alias = "openai")]
    Remote,
}

impl From<Backend> for ProviderKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Local => ProviderKind::Local,
            Backend::Remote => ProviderKind::Remote,
        }
    }
}

fn non_blank(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("job description text must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

/// Full help text for usage errors caused by missing job description input.
fn missing_input_help(err: &clap::Error) -> Option<String> {
    let missing = match err.kind() {
        ClapErrorKind::MissingRequiredArgument => true,
        ClapErrorKind::ValueValidation => matches!(
            err.get(ContextKind::InvalidArg),
            Some(ContextValue::String(arg)) if arg.contains("--text")
        ),
        _ => false,
    };
    missing.then(|| Cli::command().render_help().to_string())
}

fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        if let Some(help) = missing_input_help(&err) {
            eprintln!("{help}");
        }
        err.exit()
    })
}

fn read_input(input: Input) -> Result<String> {
    match (input.text, input.file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => read_file(&path),
        (None, None) => bail!("either --text or --file is required"),
    }
}

fn read_file(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("File not found: {}", path.display())
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

fn load_anchors(path: Option<&Path>) -> Result<AnchorSet> {
    let anchors = match path {
        Some(path) => AnchorSet::from_path(path)?,
        None => AnchorSet::builtin()?,
    };
    debug!(count = anchors.len(), "anchor corpus ready");
    Ok(anchors)
}

fn run(cli: Cli) -> Result<()> {
    let text = read_input(cli.input)?;
    let anchors = load_anchors(cli.anchors.as_deref())?;

    let mut config = Config::from_env()?;
    config.show_download_progress = !cli.json;

    let provider = ProviderKind::from(cli.backend);
    info!(%provider, "building embedder");
    let embedder = build_embedder(provider, &config)?;

    let mut classifier = Classifier::new(embedder, anchors);
    let result = classifier.classify(&text)?;

    if cli.json {
        let payload = serde_json::to_string_pretty(&Report::from(&result))?;
        println!("{payload}");
    } else {
        println!("{}", render_text(&result, cli.explain));
    }

    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_cli();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
