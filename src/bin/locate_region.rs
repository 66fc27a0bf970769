//! Locate Search Terms on a Page
//!
//! Reads a page's text layer and a list of terms from a JSON file and prints
//! the best-matching region as JSON, or `null` when nothing qualifies.
//!
//! Input format:
//!
//! ```json
//! {
//!   "terms": ["Gianna", "Rossi"],
//!   "fragments": [{"text": "Gian-", "rect": {"x": 40.0, "y": 100.0, "width": 30.0, "height": 12.0}}],
//!   "config": {"anchor_term": "4"}
//! }
//! ```
//!
//! Usage:
//!   cargo run --release --bin locate_region -- page.json
//!   cargo run --release --bin locate_region -- page.json --anchor 4 --compact

use region_locator::config::LocatorConfig;
use region_locator::layout::TextFragment;
use region_locator::search::RegionLocator;
use region_locator::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct PageInput {
    terms: Vec<String>,
    fragments: Vec<TextFragment>,
    #[serde(default)]
    config: Option<LocatorConfig>,
}

struct CliConfig {
    input: Option<PathBuf>,
    anchor: Option<String>,
    compact: bool,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut anchor = None;
        let mut compact = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--anchor" => {
                    i += 1;
                    if i < args.len() {
                        anchor = Some(args[i].clone());
                    }
                },
                "--compact" => {
                    compact = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => {
                    input = Some(PathBuf::from(other));
                },
            }
            i += 1;
        }

        Self {
            input,
            anchor,
            compact,
            verbose,
        }
    }
}

fn run(cli: &CliConfig, input: &Path) -> Result<()> {
    let raw = fs::read_to_string(input)?;
    let page: PageInput = serde_json::from_str(&raw)?;

    let mut config = page.config.unwrap_or_default();
    if let Some(anchor) = &cli.anchor {
        config = config.with_anchor_term(anchor.as_str());
    }

    let locator = RegionLocator::with_config(config)?;
    let start = Instant::now();
    let found = locator.locate(&page.terms, &page.fragments);
    let elapsed = start.elapsed();

    let json = if cli.compact {
        serde_json::to_string(&found)?
    } else {
        serde_json::to_string_pretty(&found)?
    };
    println!("{}", json);

    if cli.verbose {
        match &found {
            Some(region) => eprintln!(
                "{} fragments, {} terms: {} {} fragments at {:?} ({:.2} ms)",
                page.fragments.len(),
                page.terms.len(),
                if region.is_trace() { "trace of" } else { "cluster of" },
                region.len(),
                region.bounds(),
                elapsed.as_secs_f64() * 1000.0
            ),
            None => eprintln!(
                "{} fragments, {} terms: no region ({:.2} ms)",
                page.fragments.len(),
                page.terms.len(),
                elapsed.as_secs_f64() * 1000.0
            ),
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = CliConfig::from_args();
    let Some(input) = cli.input.clone() else {
        eprintln!("Usage: locate_region <input.json> [--anchor <term>] [--compact] [--verbose]");
        std::process::exit(2);
    };

    if let Err(e) = run(&cli, &input) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
