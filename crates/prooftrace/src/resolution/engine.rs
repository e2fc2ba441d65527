//! Propositional resolution loop
//!
//! Clauses arrive literal-only. Each popped clause `C` is resolved on every
//! literal `l` against the indexed clauses containing `~l`; only afterwards is
//! `C` itself indexed, so a clause never meets itself and every pair of
//! clauses is tried exactly once, by whichever of the two is popped later.
//!
//! Resolvents go through the clause store: a literal set seen before is
//! dropped, a new one is committed to the trace and queued. The first empty
//! resolvent ends the search.

use super::index::LiteralIndex;
use super::queue::WorkQueue;
use super::store::{Admission, ClauseStore};
use crate::config::{ProverConfig, QueueOrder};
use crate::fol::{Clause, ClauseId, FormulaArena, FormulaId, Literals, Rule};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// Why a search stopped without a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Cancelled,
    IterationLimit,
    ClauseLimit,
    Timeout,
}

/// Outcome of running the loop to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saturation {
    /// The empty clause, under this handle
    Refuted(ClauseId),
    /// Queue drained without a contradiction
    Saturated,
    Stopped(StopReason),
}

/// Caller-imposed limits, checked once per queue pop
#[derive(Debug, Clone)]
pub struct Budget {
    max_iterations: usize,
    max_clauses: usize,
    deadline: Option<Instant>,
    cancel: Arc<AtomicBool>,
}

impl Budget {
    pub fn new(config: &ProverConfig, start: Instant, cancel: Arc<AtomicBool>) -> Self {
        Budget {
            max_iterations: config.max_iterations,
            max_clauses: config.max_clauses,
            deadline: config.timeout.map(|t| start + t),
            cancel,
        }
    }

    pub fn unlimited() -> Self {
        Budget {
            max_iterations: 0,
            max_clauses: 0,
            deadline: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn check(&self, iterations: usize, clauses: usize) -> Option<StopReason> {
        if self.cancel.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }
        if self.max_iterations > 0 && iterations >= self.max_iterations {
            return Some(StopReason::IterationLimit);
        }
        if self.max_clauses > 0 && clauses >= self.max_clauses {
            return Some(StopReason::ClauseLimit);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(StopReason::Timeout);
            }
        }
        None
    }
}

/// Counters for one run of the loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStats {
    pub iterations: usize,
    pub resolvents: usize,
    pub duplicates: usize,
    pub tautologies: usize,
}

#[derive(Debug)]
pub struct ResolutionEngine {
    index: LiteralIndex,
    queue: WorkQueue,
    record_tautologies: bool,
    stats: ResolutionStats,
}

impl ResolutionEngine {
    pub fn new(order: QueueOrder) -> Self {
        ResolutionEngine {
            index: LiteralIndex::new(),
            queue: WorkQueue::new(order),
            record_tautologies: false,
            stats: ResolutionStats::default(),
        }
    }

    pub fn from_config(config: &ProverConfig) -> Self {
        let mut engine = Self::new(config.queue_order);
        engine.record_tautologies = config.record_tautologies;
        engine
    }

    /// Queue a committed literal-only clause
    pub fn enqueue(&mut self, store: &ClauseStore, id: ClauseId) {
        self.queue.push(id, store.get(id).len());
    }

    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn run(&mut self, arena: &FormulaArena, store: &mut ClauseStore, budget: &Budget) -> Saturation {
        while let Some(given) = self.queue.pop() {
            if let Some(reason) = budget.check(self.stats.iterations, store.len()) {
                debug!(?reason, iterations = self.stats.iterations, "resolution stopped");
                return Saturation::Stopped(reason);
            }
            self.stats.iterations += 1;

            let literals = store.get(given).literals.clone();
            trace!(
                clause = store.trace_index(given),
                literals = %literals.display(arena),
                "processing clause"
            );

            if contains_complementary_pair(arena, &literals) {
                self.stats.tautologies += 1;
                continue;
            }

            for lit in literals.iter() {
                let Some(complement) = arena.complement_of(lit) else {
                    continue;
                };
                let partners: Vec<ClauseId> = self.index.clauses_with(complement).collect();
                for partner in partners {
                    if let Some(empty) =
                        self.resolve(arena, store, (given, &literals, lit), (partner, complement))
                    {
                        return Saturation::Refuted(empty);
                    }
                }
            }

            self.index.insert(given, &literals);
        }
        Saturation::Saturated
    }

    /// Resolve `given` on `lit` with `partner` on `complement`; returns the
    /// empty clause if one was derived
    fn resolve(
        &mut self,
        arena: &FormulaArena,
        store: &mut ClauseStore,
        (given, literals, lit): (ClauseId, &Literals, FormulaId),
        (partner, complement): (ClauseId, FormulaId),
    ) -> Option<ClauseId> {
        let members: Vec<FormulaId> = literals
            .iter()
            .filter(|&f| f != lit)
            .chain(store.get(partner).literals.iter().filter(|&f| f != complement))
            .collect();
        let resolvent = Literals::build(arena, members);
        self.stats.resolvents += 1;

        let clause = Clause::new(resolvent, Rule::Resolution, vec![given, partner]);
        if clause.literals.is_tautology(arena) {
            self.stats.tautologies += 1;
            if self.record_tautologies {
                store.admit(clause);
            }
            return None;
        }

        let empty = clause.is_empty();
        let size = clause.len();
        match store.admit(clause) {
            Admission::New(id) if empty => Some(id),
            Admission::New(id) => {
                self.queue.push(id, size);
                None
            }
            Admission::Seen(id) => {
                self.stats.duplicates += 1;
                empty.then_some(id)
            }
        }
    }
}

fn contains_complementary_pair(arena: &FormulaArena, literals: &Literals) -> bool {
    literals.iter().any(|lit| {
        arena
            .complement_of(lit)
            .is_some_and(|complement| literals.contains(complement))
    })
}
