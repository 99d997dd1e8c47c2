//! stack2pprof CLI
//!
//! Converts plain-text stack trace dumps into gzip-compressed pprof
//! profiles ready for `go tool pprof` and compatible viewers.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use stack2pprof::commands::{execute_convert, validate_args, ConvertArgs};
use stack2pprof::utils::config::DEFAULT_OUTPUT_FILE;

/// stack2pprof - Convert stack trace dumps to pprof profiles
#[derive(Parser, Debug)]
#[command(name = "stack2pprof")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read the stack dump from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output path for the gzipped pprof profile
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Create convert args
    let args = ConvertArgs {
        input: cli.input,
        output: cli.output,
    };

    // Validate args first
    validate_args(&args)?;

    // Execute conversion
    execute_convert(args)?;

    Ok(())
}
