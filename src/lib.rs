//! stack2pprof
//!
//! Converts plain-text stack trace dumps (blocks of frame lines followed
//! by a sample count) into gzip-compressed pprof profiles.
//!
//! This crate provides the core implementation for the
//! `stack2pprof` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install stack2pprof
//! stack2pprof --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
