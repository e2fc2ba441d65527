//! Literal index: which processed clauses contain a given literal

use crate::fol::{ClauseId, FormulaId, Literals};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Literal to clause map, filled only with clauses already popped and processed
///
/// Per-literal sets keep insertion order so partner iteration is stable.
#[derive(Debug, Default)]
pub struct LiteralIndex {
    occurrences: HashMap<FormulaId, IndexSet<ClauseId>>,
    clauses: usize,
}

impl LiteralIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ClauseId, literals: &Literals) {
        for lit in literals.iter() {
            self.occurrences.entry(lit).or_default().insert(id);
        }
        self.clauses += 1;
    }

    pub fn clauses_with(&self, literal: FormulaId) -> impl Iterator<Item = ClauseId> + '_ {
        self.occurrences
            .get(&literal)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of indexed clauses
    pub fn len(&self) -> usize {
        self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses == 0
    }
}
