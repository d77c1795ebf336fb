//! # jobatlas
//!
//! Command-line front end for the comparative metrics engine.
//!
//! ## Usage
//!
//! ```bash
//! # Top 10 career areas in California, with Tennessee aligned against them
//! jobatlas --data-dir data compare CA TN --table career
//!
//! # Skills within one career area, over a year range, as JSON
//! jobatlas compare California Texas -t skills --career-area "Information Technology" --json
//!
//! # Per-state share of U.S. AI jobs in 2023
//! jobatlas rollup --from 2023 --metric national-share
//!
//! # Step through every year once
//! jobatlas animate
//!
//! # Check the snapshots for broken rows
//! jobatlas validate
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
