//! Command-line front end for memorial.
//!
//! Reads a survey memorial PDF, runs the extraction pipeline, and prints the
//! result as JSON, GeoJSON, or WKT. Exits with status 1 when no valid ring
//! was found, so shell pipelines can react to failed extractions.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use memorial::{DocumentResult, ParseConfig, projection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The raw document result as JSON.
    Json,
    /// A GeoJSON Feature with a closed Polygon ring.
    Geojson,
    /// A WKT POLYGON string.
    Wkt,
}

#[derive(Debug, Parser)]
#[command(
    name = "memorial",
    version,
    about = "Extract georeferenced parcel polygons from cadastral survey memorial PDFs"
)]
struct Cli {
    /// Input PDF file.
    #[arg(required_unless_present = "list_projections")]
    input: Option<PathBuf>,

    /// Target CRS registry key (e.g. SIRGAS2000_22S). Resolved from the
    /// document's coordinates when omitted.
    #[arg(long)]
    projection: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Load additional configuration from a TOML file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the CRS registry and exit.
    #[arg(long)]
    list_projections: bool,

    /// Increase log verbosity (-v: info, -vv: debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_projections() {
    println!("{:<16} {:<8} NAME", "KEY", "EPSG");
    for def in projection::registry::all() {
        let epsg = def.epsg.map(|code| code.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{:<16} {:<8} {}", def.key, epsg, def.name);
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<ParseConfig> {
    let mut config = match &cli.config {
        Some(path) => ParseConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ParseConfig::default(),
    };
    if cli.projection.is_some() {
        config.projection = cli.projection.clone();
    }
    Ok(config)
}

fn render_output(result: &DocumentResult, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            }
        }
        OutputFormat::Geojson => {
            let value = result.to_geojson();
            if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            }
        }
        OutputFormat::Wkt => result
            .to_wkt()
            .unwrap_or_else(|| "POLYGON EMPTY".to_string()),
    };
    Ok(text)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_projections {
        list_projections();
        return Ok(ExitCode::SUCCESS);
    }

    let input = cli.input.clone().expect("clap enforces input unless listing");
    let config = build_config(&cli)?;

    let result = memorial::parse_pdf_file(&input, config)
        .await
        .with_context(|| format!("failed to process {}", input.display()))?;

    println!("{}", render_output(&result, cli.format, cli.pretty)?);

    if !result.has_valid_ring() {
        tracing::warn!(
            vertices = result.vertices.len(),
            "no valid ring extracted (need at least 3 vertices)"
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
