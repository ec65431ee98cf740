//! Demock CLI
//!
//! Runs one call against a directory of fixtures and prints the outcome the
//! client would observe, honoring `$delay`, `$timeout` and `$status`.
//!
//! Usage:
//!   demock --fixtures <dir> [--config <file>] [--method POST] [--param k=v]... <url>

use anyhow::Context;
use clap::Parser;
use demock::transport::{DirectorySource, MockTransport};
use demock::{DemockConfig, FilterChain, Request};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "demock")]
#[command(author, version, about = "Serve a call from directive-annotated JSON fixtures")]
struct Args {
    /// Request URL; a query string becomes request parameters
    #[arg(required = true)]
    url: String,

    /// Directory the fixtures are served from
    #[arg(short, long, env = "DEMOCK_FIXTURES", default_value = ".")]
    fixtures: std::path::PathBuf,

    /// Chain configuration file (YAML or JSON)
    #[arg(short, long, env = "DEMOCK_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Request parameter as name=value; values that parse as JSON are kept typed
    #[arg(short, long = "param", value_parser = parse_param)]
    params: Vec<(String, Value)>,
}

fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DemockConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DemockConfig {
            default_document: Some("index.json".to_string()),
            ..Default::default()
        },
    };

    let chain = FilterChain::from_config(&config)?;
    let transport = MockTransport::new(chain, DirectorySource::new(&args.fixtures));

    let mut request = Request::from_url(&args.method, &args.url);
    request.params.extend(args.params);
    info!(method = %request.method, url = %request.url, "Serving mock call");

    let outcome = transport.call(request).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.is_resolved() {
        std::process::exit(1);
    }
    Ok(())
}
