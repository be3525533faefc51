//! Reasoning transcript visualizer binary entry point.
//!
//! Reads a transcript from a file or stdin and prints the visualization
//! result as JSON on stdout. All logs go to stderr.
//!
//! Coverage is excluded because the binary only wires together library
//! functions that are tested on their own.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

use clap::Parser;

use reasongraph::config::Config;
use reasongraph::error::AppError;
use reasongraph::methods::{parse, ReasoningMethod};
use reasongraph::visualize::visualize;

/// Render a reasoning transcript as a Mermaid flowchart.
#[derive(Parser, Debug)]
#[command(name = "reasongraph", version, about)]
struct Cli {
    /// Reasoning method: cot, tot, l2m, scr, srf or bs
    method: ReasoningMethod,

    /// The question the transcript answers
    question: String,

    /// Read the transcript from this file instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Print the parsed response instead of the visualization
    #[arg(long)]
    parsed: bool,
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr only (stdout is for the JSON result)
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let raw_text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    let layout = config.visualization_for(cli.method);
    tracing::debug!(
        "Layout for {}: {}x{}",
        cli.method.name(),
        layout.max_chars_per_line,
        layout.max_lines
    );

    let output = if cli.parsed {
        serde_json::to_string_pretty(&parse(cli.method, &raw_text, &cli.question)?)?
    } else {
        serde_json::to_string_pretty(&visualize(cli.method, &raw_text, &cli.question, &layout))?
    };

    println!("{output}");
    Ok(())
}
