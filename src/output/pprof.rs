//! pprof protobuf output writer.
//!
//! Lowers the in-memory profile to the pprof wire format and writes it
//! gzip-compressed, the framing pprof tools expect.

use crate::output::proto;
use crate::parser::schema::Profile;
use crate::utils::error::OutputError;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use prost::Message;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Deduplicating pprof string table.
///
/// Index 0 is always the empty string; every other string gets the index
/// of its first insertion.
struct StringTable {
    strings: Vec<String>,
    index: HashMap<String, i64>,
}

impl StringTable {
    fn new() -> Self {
        let mut table = Self {
            strings: Vec::new(),
            index: HashMap::new(),
        };
        table.intern("");
        table
    }

    fn intern(&mut self, s: &str) -> i64 {
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.strings.len() as i64;
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), idx);
        idx
    }

    fn into_vec(self) -> Vec<String> {
        self.strings
    }
}

/// Lower a profile to its pprof protobuf representation
///
/// **Public** - used by the writer and handy for tests
///
/// Strings move into the deduplicated string table; IDs carry over
/// unchanged, so samples keep pointing at the same locations they did in
/// the input.
///
/// # Arguments
/// * `profile` - Profile data to lower
///
/// # Returns
/// The wire-format message, ready to encode
pub fn to_proto(profile: &Profile) -> proto::Profile {
    let mut strings = StringTable::new();

    let sample_type = proto::ValueType {
        r#type: strings.intern(&profile.sample_type.kind),
        unit: strings.intern(&profile.sample_type.unit),
    };

    let function = profile
        .functions
        .iter()
        .map(|f| proto::Function {
            id: f.id,
            name: strings.intern(&f.name),
            ..Default::default()
        })
        .collect();

    let location = profile
        .locations
        .iter()
        .map(|l| proto::Location {
            id: l.id,
            line: l
                .line
                .iter()
                .map(|line| proto::Line {
                    function_id: line.function_id,
                    line: 0,
                })
                .collect(),
            ..Default::default()
        })
        .collect();

    let sample = profile
        .samples
        .iter()
        .map(|s| proto::Sample {
            location_id: s.location_ids.clone(),
            value: s.values.clone(),
            label: Vec::new(),
        })
        .collect();

    proto::Profile {
        sample_type: vec![sample_type],
        sample,
        location,
        function,
        string_table: strings.into_vec(),
        time_nanos: Utc::now().timestamp_nanos_opt().unwrap_or(0),
        ..Default::default()
    }
}

/// Write a profile to a gzipped pprof file
///
/// **Public** - main entry point for pprof output
///
/// # Arguments
/// * `profile` - Profile data to write
/// * `output_path` - Path to output .pb.gz file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let profile = assemble_profile(reader)?;
/// write_profile(&profile, "profile.pb.gz")?;
/// ```
pub fn write_profile(profile: &Profile, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing profile to: {}", output_path.display());

    // Validate path
    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let message = to_proto(profile);
    let encoded = message.encode_to_vec();
    debug!("Encoded profile: {} bytes uncompressed", encoded.len());

    // Open file for writing
    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;

    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    encoder.write_all(&encoded)?;
    // finish() must run explicitly so gzip trailer and I/O errors surface.
    let mut writer = encoder.finish()?;
    writer.flush()?;

    info!(
        "Profile written successfully ({} samples, {} bytes)",
        message.sample.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{Function, Line, Location, Sample, ValueType};
    use flate2::read::GzDecoder;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::NamedTempFile;

    fn create_test_profile() -> Profile {
        Profile {
            sample_type: ValueType {
                kind: "stacks".to_string(),
                unit: "count".to_string(),
            },
            samples: vec![Sample {
                location_ids: vec![1, 3],
                values: vec![7],
            }],
            functions: vec![
                Function {
                    id: 2,
                    name: "funcA".to_string(),
                },
                Function {
                    id: 4,
                    name: "funcB".to_string(),
                },
            ],
            locations: vec![
                Location {
                    id: 1,
                    line: vec![Line { function_id: 2 }],
                },
                Location {
                    id: 3,
                    line: vec![Line { function_id: 4 }],
                },
            ],
        }
    }

    #[test]
    fn test_string_table_interning() {
        let mut table = StringTable::new();

        assert_eq!(table.intern("funcA"), 1);
        assert_eq!(table.intern("funcB"), 2);
        assert_eq!(table.intern("funcA"), 1);
        assert_eq!(table.intern(""), 0);

        let strings = table.into_vec();
        assert_eq!(strings, vec!["", "funcA", "funcB"]);
    }

    #[test]
    fn test_to_proto_preserves_structure() {
        let message = to_proto(&create_test_profile());

        assert_eq!(message.sample_type.len(), 1);
        assert_eq!(
            message.string_table[message.sample_type[0].r#type as usize],
            "stacks"
        );
        assert_eq!(
            message.string_table[message.sample_type[0].unit as usize],
            "count"
        );

        assert_eq!(message.sample[0].location_id, vec![1, 3]);
        assert_eq!(message.sample[0].value, vec![7]);

        assert_eq!(message.function[0].id, 2);
        assert_eq!(
            message.string_table[message.function[0].name as usize],
            "funcA"
        );

        assert_eq!(message.location[1].id, 3);
        assert_eq!(message.location[1].line[0].function_id, 4);
    }

    #[test]
    fn test_to_proto_empty_profile() {
        let profile = Profile {
            sample_type: ValueType {
                kind: "stacks".to_string(),
                unit: "count".to_string(),
            },
            samples: vec![],
            functions: vec![],
            locations: vec![],
        };
        let message = to_proto(&profile);

        assert_eq!(message.string_table, vec!["", "stacks", "count"]);
        assert!(message.sample.is_empty());
        assert!(message.time_nanos > 0);
    }

    #[test]
    fn test_write_and_decode_profile() {
        let profile = create_test_profile();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_profile(&profile, path).unwrap();

        // The file is gzip-framed; decompress and decode it back.
        let mut decoder = GzDecoder::new(File::open(path).unwrap());
        let mut bytes = Vec::new();
        decoder.read_to_end(&mut bytes).unwrap();

        let decoded = proto::Profile::decode(&bytes[..]).unwrap();
        assert_eq!(decoded.sample.len(), 1);
        assert_eq!(decoded.sample[0].value, vec![7]);
        assert_eq!(decoded.location.len(), 2);
        assert_eq!(decoded.function.len(), 2);
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        // Try to write to a directory path
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/profile.pb.gz");

        let profile = create_test_profile();
        write_profile(&profile, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
