//! consensus-runner: synthesize one item's opinions into a consensus.
//!
//! Reads `{"item_id": ..., "opinions": [...]}` from a file (or stdin when no
//! path is given) and writes the consensus as JSON to stdout. Logs go to stderr.
//!
//! Usage:
//!   consensus-runner opinions.json
//!   cat opinions.json | consensus-runner --compact

use analysis_core::OpinionSet;
use anyhow::{Context, Result};
use consensus_engine::{ConsensusEngine, EngineConfig};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct SynthesisRequest {
    item_id: String,
    opinions: OpinionSet,
}

fn parse_request(raw: &str) -> Result<SynthesisRequest> {
    serde_json::from_str(raw).context("input is not a valid synthesis request")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path)),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let compact = args.iter().any(|a| a == "--compact");
    let path = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);

    let config = EngineConfig::from_env()?;
    let engine = ConsensusEngine::new(config)?;

    let request = parse_request(&read_input(path)?)?;
    tracing::info!(
        "Synthesizing {} opinion(s) for {}",
        request.opinions.len(),
        request.item_id
    );

    let consensus = engine.synthesize(&request.item_id, &request.opinions)?;
    tracing::info!(
        "{}: {} ({:.0}% confidence, {} conflict(s))",
        consensus.item_id,
        consensus.recommendation.as_str(),
        consensus.action_confidence * 100.0,
        consensus.conflicts.len()
    );

    let output = if compact {
        serde_json::to_string(&consensus)?
    } else {
        serde_json::to_string_pretty(&consensus)?
    };
    println!("{}", output);

    Ok(())
}
