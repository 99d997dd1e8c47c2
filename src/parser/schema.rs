//! Profile object model built during conversion.
//!
//! This module defines the object graph we hand to the pprof writer:
//! samples referencing locations referencing functions, all cross-linked
//! by integer IDs. Wire-format concerns (string tables, field numbers)
//! belong to the writer, not to these types.

/// Describes what the one value in each sample measures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueType {
    /// Measurement kind (always "stacks" in this converter)
    pub kind: String,

    /// Measurement unit (always "count")
    pub unit: String,
}

/// A deduplicated symbol name with a stable identifier
///
/// One Function exists per distinct symbol name. Created once by the
/// symbol table and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Unique nonzero ID, drawn from the counter shared with locations
    pub id: u64,

    /// Symbol name exactly as extracted from the frame line
    pub name: String,
}

/// One line entry attributed to a location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// ID of the function this line belongs to
    pub function_id: u64,
}

/// A call-site record, 1:1 with functions in this converter
///
/// The input carries no address or inlining information, so every
/// location wraps its function through a single synthetic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Unique nonzero ID, drawn from the counter shared with functions
    pub id: u64,

    /// Always exactly one line here
    pub line: Vec<Line>,
}

/// One aggregated stack trace occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Location IDs in the order the frame lines appeared
    pub location_ids: Vec<u64>,

    /// Single-element list: how many times this stack was observed
    pub values: Vec<i64>,
}

/// The aggregate root handed to the pprof writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// What the sample values measure
    pub sample_type: ValueType,

    /// Samples in input block order
    pub samples: Vec<Sample>,

    /// All functions the samples reference, ascending by ID
    pub functions: Vec<Function>,

    /// All locations the samples reference, ascending by ID
    pub locations: Vec<Location>,
}
