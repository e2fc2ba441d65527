//! Clause store: arena of clauses plus the derivation trace
//!
//! Every clause gets a stable [`ClauseId`] when it is admitted. Admission is
//! keyed by literal set, so a set that was seen before is never stored twice
//! and the trace (the ordered projection of admitted handles) stays
//! duplicate-free.

use crate::fol::{Clause, ClauseId, Literals};
use std::collections::HashMap;

/// Outcome of offering a clause to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First clause with this literal set; committed to the trace
    New(ClauseId),
    /// The literal set is already known under this handle
    Seen(ClauseId),
}

impl Admission {
    pub fn id(self) -> ClauseId {
        match self {
            Admission::New(id) | Admission::Seen(id) => id,
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, Admission::New(_))
    }
}

#[derive(Debug, Default)]
pub struct ClauseStore {
    clauses: Vec<Clause>,
    trace: Vec<ClauseId>,
    seen: HashMap<Literals, ClauseId>,
}

impl ClauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a clause unless its literal set has been seen
    pub fn admit(&mut self, mut clause: Clause) -> Admission {
        if let Some(&existing) = self.seen.get(&clause.literals) {
            return Admission::Seen(existing);
        }
        let id = ClauseId(self.clauses.len());
        self.trace.push(id);
        clause.index = Some(self.trace.len());
        self.seen.insert(clause.literals.clone(), id);
        self.clauses.push(clause);
        Admission::New(id)
    }

    pub fn lookup(&self, literals: &Literals) -> Option<ClauseId> {
        self.seen.get(literals).copied()
    }

    pub fn get(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.0]
    }

    /// Handles in the order their clauses were first introduced
    pub fn trace(&self) -> &[ClauseId] {
        &self.trace
    }

    /// 1-based trace position of a committed clause
    pub fn trace_index(&self, id: ClauseId) -> usize {
        self.get(id).index.unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}
