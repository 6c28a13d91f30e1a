//! CLI entry point for the map data rater.
//!
//! Loads a locations dataset and a metadata dataset, joins them by id, and
//! prints per-type counts and average ratings, the most-reviewed location,
//! and the locations no metadata refers to.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use map_data_rater::{
    error::LoadError,
    fetch::BasicClient,
    loader::{Source, load_dataset},
    output::{append_record, print_json, print_pretty, render_text},
    stats::Summary,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "map_data_rater")]
#[command(about = "Join location and metadata datasets and report per-type statistics", long_about = None)]
struct Cli {
    /// Locations JSON: path to file or URL to fetch
    #[arg(long, value_name = "FILE_OR_URL", env = "MAP_DATA_LOCATIONS", default_value = "locations.json")]
    locations: String,

    /// Metadata JSON: path to file or URL to fetch
    #[arg(long, value_name = "FILE_OR_URL", env = "MAP_DATA_METADATA", default_value = "metadata.json")]
    metadata: String,

    /// Report format written to stdout
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Optional: CSV file to append per-type results to
    #[arg(long)]
    csv: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/map_data_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("map_data_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        match e.downcast_ref::<LoadError>() {
            Some(load) if load.is_decode() => {
                error!(source = load.source_name(), error = %load, "Input is malformed")
            }
            Some(load) if load.is_data_source() => {
                error!(source = load.source_name(), error = %load, "Input is unavailable")
            }
            _ => error!(error = %format!("{e:#}"), "Run failed"),
        }
        return Err(e);
    }

    Ok(())
}

/// Loads both sources, aggregates, and writes the report. Nothing is printed
/// unless both datasets load.
#[tracing::instrument(skip(cli), fields(locations = %cli.locations, metadata = %cli.metadata))]
async fn run(cli: &Cli) -> Result<()> {
    let client = BasicClient::new().context("failed to build HTTP client")?;

    let locations_source = Source::parse(&cli.locations);
    let metadata_source = Source::parse(&cli.metadata);

    let dataset = load_dataset(&client, &locations_source, &metadata_source)
        .await
        .context("failed to load input datasets")?;

    let summary = Summary::from_records(&dataset.locations, &dataset.metadata);
    print_pretty(&summary);

    info!(
        types = summary.type_stats.len(),
        matched = summary.matched_records,
        invalid_locations = summary.invalid_locations.len(),
        "Aggregation complete"
    );
    if !summary.unmatched_metadata.is_empty() {
        warn!(
            count = summary.unmatched_metadata.len(),
            ids = ?summary.unmatched_metadata,
            "Metadata records without a matching location were excluded"
        );
    }

    match cli.format {
        Format::Text => print!("{}", render_text(&summary)?),
        Format::Json => print_json(&summary)?,
    }

    if let Some(path) = &cli.csv {
        append_record(path, &summary).with_context(|| format!("failed to append to {path}"))?;
        info!(path = %path, "CSV records appended");
    }

    Ok(())
}
