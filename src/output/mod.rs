//! Output writers for profile data.
//!
//! This module handles writing the assembled profile to disk:
//! - pprof protobuf encoding (checked-in prost types)
//! - gzip-compressed file output

pub mod pprof;
pub mod proto;

// Re-export main functions
pub use pprof::{to_proto, write_profile};
