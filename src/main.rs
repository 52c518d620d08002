//! Dwell - Search-and-Browse Orchestrator
//!
//! Main entry point for the CLI application.

use clap::Parser;
use dwell::{Config, Orchestrator};

/// Dwell - open top search results and simulate reading them
#[derive(Parser, Debug)]
#[command(name = "dwell")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search query (falls back to the configured default term)
    query: Option<String>,

    /// Seconds each tab stays open after loading
    #[arg(long)]
    dwell_secs: Option<u64>,

    /// Seconds to wait after all tabs finish before closing everything
    #[arg(long)]
    teardown_secs: Option<u64>,

    /// Maximum number of result links to open
    #[arg(long)]
    max_results: Option<usize>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(dwell_secs) = args.dwell_secs {
        config.timing.dwell_secs = dwell_secs;
    }

    if let Some(teardown_secs) = args.teardown_secs {
        config.timing.teardown_secs = teardown_secs;
    }

    if let Some(max_results) = args.max_results {
        config.search.max_results = max_results;
    }

    if args.debug {
        config.browser.debug = true;
    }

    let orchestrator = Orchestrator::new(config);
    orchestrator.run(args.query).await?;

    Ok(())
}
