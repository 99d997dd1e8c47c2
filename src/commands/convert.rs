//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads a stack dump from a file or stdin
//! 2. Parses it into stack blocks and assembles the profile
//! 3. Encodes the profile as pprof protobuf
//! 4. Writes the gzip-compressed result

use crate::aggregator::assemble_profile;
use crate::output::write_profile;
use crate::utils::config::DEFAULT_OUTPUT_FILE;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Stack dump to read (None reads stdin)
    pub input: Option<PathBuf>,

    /// Output path for the gzipped pprof profile
    pub output: PathBuf,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Convert command arguments
///
/// # Returns
/// Ok if conversion succeeds, Err with context if any step fails
///
/// # Errors
/// * Input file open/read errors
/// * Output file write errors
///
/// # Example
/// ```ignore
/// let args = ConvertArgs {
///     input: Some(PathBuf::from("stacks.txt")),
///     output: PathBuf::from("profile.pb.gz"),
/// };
///
/// execute_convert(args)?;
/// ```
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Read and parse the stack dump
    let profile = match &args.input {
        Some(path) => {
            info!("Step 1/2: Parsing stack dump from {}...", path.display());
            let file = File::open(path)
                .context(format!("Failed to open input file {}", path.display()))?;
            assemble_profile(BufReader::new(file)).context("Failed to read stack dump")?
        }
        None => {
            info!("Step 1/2: Parsing stack dump from stdin...");
            let stdin = io::stdin();
            assemble_profile(stdin.lock()).context("Failed to read stack dump from stdin")?
        }
    };

    debug!(
        "Parsed profile: {} samples, {} functions, {} locations",
        profile.samples.len(),
        profile.functions.len(),
        profile.locations.len()
    );

    if profile.samples.is_empty() {
        warn!("No stack blocks found in input; writing an empty profile");
    }

    // Step 2: Encode and write the profile
    info!("Step 2/2: Writing compressed pprof profile...");
    write_profile(&profile, &args.output).context("Failed to write pprof profile")?;

    info!("✓ Profile written to: {}", args.output.display());

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(input) = &args.input {
        if input.as_os_str().is_empty() {
            anyhow::bail!("Input path cannot be empty");
        }
    }

    Ok(())
}
