//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and
//! commands.
//!
//! Parsing defines no error type at all: every input line classifies as a
//! count, a header, or a frame, so the parsing layer cannot fail. The only
//! fallible library operation is writing the output file.

use thiserror::Error;

/// Errors that can occur while writing the converted profile
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
