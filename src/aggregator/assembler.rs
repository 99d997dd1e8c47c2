//! Profile assembly from parsed stack blocks.

use std::io::BufRead;

use log::debug;

use crate::aggregator::symbol_table::SymbolTable;
use crate::parser::{Profile, Sample, StackBlock, StackTraceParser, ValueType};
use crate::utils::config::{SAMPLE_TYPE, SAMPLE_UNIT};

/// Accumulates parsed blocks into samples while interning their frame
/// names through a [`SymbolTable`].
///
/// Samples keep the order blocks arrived in; the symbol table guarantees
/// repeated frame names resolve to the same location across all of them.
#[derive(Debug, Default)]
pub struct ProfileAssembler {
    symbols: SymbolTable,
    samples: Vec<Sample>,
}

impl ProfileAssembler {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            samples: Vec::new(),
        }
    }

    /// Record one completed block as a sample.
    pub fn add_block(&mut self, block: StackBlock) {
        let location_ids = block
            .frames
            .iter()
            .map(|name| self.symbols.get_or_insert_location(name).id)
            .collect();
        self.samples.push(Sample {
            location_ids,
            values: vec![block.count],
        });
    }

    /// Finalize into a [`Profile`] with entity tables sorted by ID.
    pub fn finish(self) -> Profile {
        let ProfileAssembler { symbols, samples } = self;
        let (functions, locations) = symbols.into_tables();
        Profile {
            sample_type: ValueType {
                kind: SAMPLE_TYPE.to_string(),
                unit: SAMPLE_UNIT.to_string(),
            },
            samples,
            functions,
            locations,
        }
    }
}

/// Parse a whole stack dump from `reader` and assemble the profile.
///
/// Lines are streamed, never buffered wholesale. A trailing block with no
/// count line is dropped. An input with no blocks at all yields an empty
/// profile rather than an error.
pub fn assemble_profile<R: BufRead>(reader: R) -> std::io::Result<Profile> {
    let mut parser = StackTraceParser::new();
    let mut assembler = ProfileAssembler::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(block) = parser.feed_line(&line) {
            assembler.add_block(block);
        }
    }

    if parser.pending_frames() > 0 {
        debug!(
            "Discarding unterminated trailing block ({} frames)",
            parser.pending_frames()
        );
    }

    let profile = assembler.finish();
    debug!(
        "Assembled {} samples, {} functions, {} locations",
        profile.samples.len(),
        profile.functions.len(),
        profile.locations.len()
    );
    Ok(profile)
}
