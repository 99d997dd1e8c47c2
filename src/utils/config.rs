//! Configuration and constants for the CLI.

/// Default output file name for the converted profile
pub const DEFAULT_OUTPUT_FILE: &str = "profile.pb.gz";

// Sample-type descriptor written into every profile. Each sample carries
// exactly one value: how many times its stack was observed.
pub const SAMPLE_TYPE: &str = "stacks";
pub const SAMPLE_UNIT: &str = "count";
