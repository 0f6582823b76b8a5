//! # QuerySight Command Line Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize tracing (stderr, optional rolling file)
//!   └─> Execute the subcommand
//! ```
//!
//! ```bash
//! querysight analyse response.json --pretty
//! curl -s localhost:8000/query | querysight analyse -
//! querysight config init
//! ```
//!
//! JSON output goes to stdout; logs go to stderr and a daily log file.

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let log_dir = querysight::logging::resolve_log_dir(cli.log_dir.as_deref());
    querysight::logging::init(cli.verbose, log_dir.as_deref())?;

    if let Err(err) = cli::run_command(cli.command) {
        tracing::error!("{err:#}");
        return Err(err);
    }
    Ok(())
}
