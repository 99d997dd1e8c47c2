//! Symbol deduplication and ID allocation.

use std::collections::HashMap;

use crate::parser::{Function, Line, Location};

/// Deduplicating registry mapping symbol names to profile entities.
///
/// Each distinct name gets exactly one [`Location`] and one [`Function`],
/// created on first sight and reused afterwards. IDs come from a single
/// counter shared by both kinds, starting at 1 (pprof reserves 0), so a
/// fresh name consumes two consecutive IDs: the location first, then the
/// function it points at.
#[derive(Debug)]
pub struct SymbolTable {
    functions: HashMap<String, Function>,
    locations: HashMap<String, Location>,
    next_id: u64,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            locations: HashMap::new(),
            next_id: 1,
        }
    }

    /// Look up the function for `name`, registering it first if unseen.
    pub fn get_or_insert_function(&mut self, name: &str) -> &Function {
        if !self.functions.contains_key(name) {
            let id = self.allocate_id();
            self.functions.insert(
                name.to_string(),
                Function {
                    id,
                    name: name.to_string(),
                },
            );
        }
        &self.functions[name]
    }

    /// Look up the location for `name`, registering it (and the function
    /// it references) first if unseen.
    pub fn get_or_insert_location(&mut self, name: &str) -> &Location {
        if !self.locations.contains_key(name) {
            let id = self.allocate_id();
            let function_id = self.get_or_insert_function(name).id;
            self.locations.insert(
                name.to_string(),
                Location {
                    id,
                    line: vec![Line { function_id }],
                },
            );
        }
        &self.locations[name]
    }

    /// Consume the table and return its entities sorted by ascending ID,
    /// ready to drop into a [`Profile`](crate::parser::Profile).
    pub fn into_tables(self) -> (Vec<Function>, Vec<Location>) {
        let mut functions: Vec<Function> = self.functions.into_values().collect();
        let mut locations: Vec<Location> = self.locations.into_values().collect();
        functions.sort_unstable_by_key(|f| f.id);
        locations.sort_unstable_by_key(|l| l.id);
        (functions, locations)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
