//! Aggregation of parsed stack blocks into a profile.
//!
//! This module transforms the parser's output into:
//! - Deduplicated function and location tables with stable IDs
//! - Samples referencing those tables by ID
//! - A complete in-memory profile ready for encoding

pub mod assembler;
pub mod symbol_table;

// Re-export main types and functions
pub use assembler::{assemble_profile, ProfileAssembler};
pub use symbol_table::SymbolTable;
