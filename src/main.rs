use newsletter_match::config::Settings;
use newsletter_match::core::MatchingService;
use newsletter_match::models::Newsletter;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Batch input: every source is matched against the same candidate pool
#[derive(Debug, Deserialize)]
struct BatchInput {
    sources: Vec<Newsletter>,
    #[serde(default)]
    candidates: Vec<Newsletter>,
}

#[derive(Debug, Error)]
enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No input file given (pass a path or set runner.input_path)")]
    MissingInput,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> Result<(), RunnerError> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting newsletter recommendation batch run...");

    let input_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.runner.input_path.clone())
        .ok_or(RunnerError::MissingInput)?;

    let raw = tokio::fs::read_to_string(&input_path)
        .await
        .map_err(|source| RunnerError::Io {
            path: input_path.clone(),
            source,
        })?;

    let input: BatchInput = serde_json::from_str(&raw).map_err(|e| {
        error!("Failed to parse {}: {}", input_path.display(), e);
        e
    })?;

    let service = MatchingService::new(settings.criteria());

    info!(
        "Matching {} sources against {} candidates with criteria: {:?}",
        input.sources.len(),
        input.candidates.len(),
        service.base_criteria()
    );

    let results = service
        .batch_find_matches(input.sources, input.candidates, None)
        .await;

    let output = if settings.runner.pretty_output {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };

    println!("{}", output);

    info!("Batch run complete ({} sources)", results.len());

    Ok(())
}

/// Logs go to stderr so stdout carries only the results
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}
