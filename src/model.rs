use serde::Serialize;
use std::collections::BTreeMap;

/// Number of bytes emitted so far, 0-based.
pub type Position = usize;

/// Names recorded with `@!name` and the output position they were recorded at.
///
/// Entries are never removed during a run; recording an existing name
/// replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VarTable {
    vars: BTreeMap<String, Position>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `pos` under `name`, returning the value it replaced.
    pub fn define(&mut self, name: String, pos: Position) -> Option<Position> {
        self.vars.insert(name, pos)
    }

    pub fn lookup(&self, name: &str) -> Option<Position> {
        self.vars.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

/// What a finished run leaves behind for the writers.
#[derive(Debug)]
pub struct Outcome {
    pub bytes_read: usize,
    pub bytes_written: Position,
    pub vars: VarTable,
}
