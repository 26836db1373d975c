//! Mark table for an editing session.
//!
//! Marks are named line numbers. The table only stores them; checking that a
//! line exists is up to whoever sets the mark.

use std::collections::HashMap;

use itertools::Itertools;

use crate::mark::MarkName;

/// All marks set in a session.
#[derive(Debug, Default, Clone)]
pub struct MarkSet {
    marks: HashMap<MarkName, usize>,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a mark's line.
    pub fn get(&self, name: MarkName) -> Option<usize> {
        self.marks.get(&name).copied()
    }

    /// Set (or move) a mark.
    pub fn set(&mut self, name: MarkName, line: usize) {
        self.marks.insert(name, line);
    }

    pub fn unset(&mut self, name: MarkName) {
        self.marks.remove(&name);
    }

    /// Marks in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkName, usize)> + '_ {
        self.marks
            .iter()
            .map(|(&name, &line)| (name, line))
            .sorted()
    }
}
