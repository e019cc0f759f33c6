use anyhow::{Context, Result};
use bugscape::{count_matches_with_config, parse::grid_from_text, MatchConfig};
use clap::Parser;
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

/// Count matches of a pattern (bug) in another pattern (landscape).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the bug pattern file
    #[arg(short, long)]
    bug: PathBuf,

    /// Path to the landscape pattern file
    #[arg(short, long)]
    landscape: PathBuf,

    /// Scan placements sequentially instead of in parallel
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let bug_text = fs::read_to_string(&cli.bug)
        .with_context(|| format!("Failed to read bug file {}", cli.bug.display()))?;
    let landscape_text = fs::read_to_string(&cli.landscape)
        .with_context(|| format!("Failed to read landscape file {}", cli.landscape.display()))?;

    let bug = grid_from_text(&bug_text);
    let landscape = grid_from_text(&landscape_text);

    let config = MatchConfig::new(!cli.sequential);
    // A malformed grid errors out here with a nonzero exit, distinct from a
    // legitimate zero-match count.
    let count = count_matches_with_config(&bug, &landscape, &config)
        .context("Malformed grid input")?;

    println!("Bug count in the landscape: {count}");

    Ok(())
}
