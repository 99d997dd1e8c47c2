//! Stack dump parsing and profile schema definitions.
//!
//! This module handles:
//! - Classifying raw dump lines (headers, frames, counts)
//! - Extracting symbol names from frame lines
//! - Defining the in-memory profile model

pub mod schema;
pub mod stack_trace;

// Re-export main types
pub use schema::{Function, Line, Location, Profile, Sample, ValueType};
pub use stack_trace::{StackBlock, StackTraceParser};
