//! Refutation driver
//!
//! A [`Prover`] owns every piece of search state for one problem. Proving
//! runs in two phases:
//!
//! 1. **Expanding**: axioms are committed as seed clauses, followed by one
//!    clause holding the negations of all conjectures. Each seed is
//!    normalized if it mentions a quantifier, then expanded into
//!    literal-only clauses which are queued for resolution. A seed that
//!    expands to the empty clause proves the problem outright.
//! 2. **Resolving**: the resolution loop runs until it derives the empty
//!    clause, drains its queue, or hits a budget.

use crate::config::ProverConfig;
use crate::error::Result;
use crate::fol::{Clause, ClauseId, FormulaArena, Literals, Rule};
use crate::normalize::{needs_normalization, normalize};
use crate::problem::{AnnotatedFormula, Problem};
use crate::resolution::{Admission, Budget, ClauseStore, ResolutionEngine, ResolutionStats, Saturation, StopReason};
use crate::tableau::{Expander, Expansion};
use crate::trace::{extract_proof, trace_steps, TraceDisplay, TraceStep};
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Verdict of a proof attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofResult {
    /// The empty clause was derived
    Proved,
    /// Every clause was processed without a contradiction
    NotProved,
    /// Stopped early by the cancel flag or a budget
    Inconclusive(StopReason),
}

impl ProofResult {
    pub fn is_proved(self) -> bool {
        self == ProofResult::Proved
    }
}

/// Counters for one proof attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProverStats {
    /// Seed clauses committed (duplicates excluded)
    pub seeds: usize,
    /// Clauses committed by first-order normalization
    pub normalized: usize,
    /// Clauses committed by expansion steps
    pub expanded: usize,
    #[serde(flatten)]
    pub resolution: ResolutionStats,
    /// Trace length at the end of the attempt
    pub clauses: usize,
    pub elapsed: Duration,
}

pub struct Prover {
    arena: FormulaArena,
    formulas: Vec<AnnotatedFormula>,
    config: ProverConfig,
    store: ClauseStore,
    cancel: Arc<AtomicBool>,
    stats: ProverStats,
    result: Option<ProofResult>,
    empty: Option<ClauseId>,
}

impl Prover {
    pub fn new(problem: Problem, config: ProverConfig) -> Self {
        Prover {
            arena: problem.arena,
            formulas: problem.formulas,
            config,
            store: ClauseStore::new(),
            cancel: Arc::new(AtomicBool::new(false)),
            stats: ProverStats::default(),
            result: None,
            empty: None,
        }
    }

    /// Flag that stops the search at the next queue pop or seed when set
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Run the search; later calls return the first verdict
    pub fn prove(&mut self) -> Result<ProofResult> {
        if let Some(result) = self.result {
            return Ok(result);
        }
        let start = Instant::now();
        let budget = Budget::new(&self.config, start, Arc::clone(&self.cancel));
        let result = self.search(&budget);
        self.stats.clauses = self.store.len();
        self.stats.elapsed = start.elapsed();

        let result = result?;
        info!(
            ?result,
            clauses = self.stats.clauses,
            iterations = self.stats.resolution.iterations,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "proof attempt finished"
        );
        self.result = Some(result);
        Ok(result)
    }

    fn search(&mut self, budget: &Budget) -> Result<ProofResult> {
        let seeds = self.seed();
        self.stats.seeds = seeds.len();

        let mut expander = Expander::new();
        let mut engine = ResolutionEngine::from_config(&self.config);

        for seed in seeds {
            if let Some(reason) = budget.check(0, self.store.len()) {
                self.stats.expanded = expander.derived();
                return Ok(ProofResult::Inconclusive(reason));
            }

            let clause = if needs_normalization(&self.arena, &self.store.get(seed).literals) {
                let before = self.store.len();
                let normalized = normalize(&mut self.arena, &mut self.store, seed)?;
                self.stats.normalized += self.store.len() - before;
                match normalized {
                    Some(id) => id,
                    None => continue,
                }
            } else {
                seed
            };

            match expander.expand(&mut self.arena, &mut self.store, clause)? {
                Expansion::Contradiction(empty) => {
                    debug!(seed = self.store.trace_index(seed), "seed expanded to the empty clause");
                    self.stats.expanded = expander.derived();
                    self.empty = Some(empty);
                    return Ok(ProofResult::Proved);
                }
                Expansion::Clauses(ids) => {
                    debug!(
                        seed = self.store.trace_index(seed),
                        clauses = ids.len(),
                        "seed expanded"
                    );
                    for id in ids {
                        engine.enqueue(&self.store, id);
                    }
                }
            }
        }
        self.stats.expanded = expander.derived();

        debug!(pending = engine.pending(), "resolving");
        let outcome = engine.run(&self.arena, &mut self.store, budget);
        self.stats.resolution = engine.stats().clone();

        Ok(match outcome {
            Saturation::Refuted(empty) => {
                self.empty = Some(empty);
                ProofResult::Proved
            }
            Saturation::Saturated => ProofResult::NotProved,
            Saturation::Stopped(reason) => ProofResult::Inconclusive(reason),
        })
    }

    /// Commit axioms, then the negated conjecture clause; returns the new seeds
    fn seed(&mut self) -> Vec<ClauseId> {
        let mut seeds = Vec::new();

        for formula in self.formulas.iter().filter(|f| !f.role.is_conjecture()) {
            let literals = Literals::build(&self.arena, [formula.formula]);
            if let Admission::New(id) = self.store.admit(Clause::input(literals, Rule::Axiom)) {
                seeds.push(id);
            }
        }

        let negated: Vec<_> = self
            .formulas
            .iter()
            .filter(|f| f.role.is_conjecture())
            .map(|f| f.formula)
            .collect();
        if !negated.is_empty() {
            let members: Vec<_> = negated.into_iter().map(|c| self.arena.not(c)).collect();
            let literals = Literals::build(&self.arena, members);
            if let Admission::New(id) = self.store.admit(Clause::input(literals, Rule::Conjecture)) {
                seeds.push(id);
            }
        }

        debug!(seeds = seeds.len(), formulas = self.formulas.len(), "seeded");
        seeds
    }

    pub fn result(&self) -> Option<ProofResult> {
        self.result
    }

    pub fn trace(&self) -> Vec<TraceStep> {
        trace_steps(&self.store)
    }

    /// Render `steps` (usually [`Prover::trace`] or a filtered copy) against this prover's arena
    pub fn display_trace<'a>(&'a self, steps: &'a [TraceStep]) -> TraceDisplay<'a> {
        TraceDisplay::new(steps, &self.arena)
    }

    /// Trace indices of the clauses used to derive the empty clause
    pub fn proof(&self) -> Option<Vec<usize>> {
        self.empty.map(|empty| extract_proof(&self.store, empty))
    }

    pub fn arena(&self) -> &FormulaArena {
        &self.arena
    }

    pub fn store(&self) -> &ClauseStore {
        &self.store
    }

    pub fn stats(&self) -> &ProverStats {
        &self.stats
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    pub fn is_first_order(&self) -> bool {
        self.formulas
            .iter()
            .any(|f| self.arena.contains_quantifier(f.formula))
    }
}

/// Whether the conjectures of `problem` follow from its other formulas
///
/// Runs without budgets; only the result of a finished search is reported.
pub fn prove(problem: Problem) -> Result<bool> {
    let mut prover = Prover::new(problem, ProverConfig::default());
    Ok(prover.prove()?.is_proved())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    fn golden_problem() -> Problem {
        let mut problem = Problem::new();
        let p = problem.arena.predicate("p", vec![]);
        let not_p = problem.arena.not(p);
        let goal = problem.arena.or(p, not_p);
        problem.conjecture("excluded_middle", goal);
        problem
    }

    #[test]
    fn test_golden_trace_for_excluded_middle() {
        let mut prover = Prover::new(golden_problem(), ProverConfig::default());
        assert_eq!(prover.prove().unwrap(), ProofResult::Proved);

        let steps = prover.trace();
        let text = prover.display_trace(&steps).to_string();
        let expected = "\
1. ~(p | ~p)  (negated conjecture)
2. ~p         (from 1 by applying alpha1 rule)
3. ~~p        (from 1 by applying alpha2 rule)
4. p          (from 3 by applying double negation rule)
5. $false     (from 4 and 2 by applying resolution rule)
";
        assert_eq!(text, expected);
        assert_eq!(prover.proof(), Some(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_prove_is_idempotent() {
        let mut prover = Prover::new(golden_problem(), ProverConfig::default());
        assert!(prover.prove().unwrap().is_proved());
        let length = prover.trace().len();
        assert!(prover.prove().unwrap().is_proved());
        assert_eq!(prover.trace().len(), length);
    }

    #[test]
    fn test_inconsistent_axioms_prove_anything() {
        let mut problem = Problem::new();
        let falsity = problem.arena.falsity();
        let q = problem.arena.predicate("q", vec![]);
        problem.axiom("bottom", falsity);
        problem.conjecture("anything", q);

        let mut prover = Prover::new(problem, ProverConfig::default());
        assert_eq!(prover.prove().unwrap(), ProofResult::Proved);
        // $false seed, then its simplification to the empty clause
        assert_eq!(prover.stats().resolution.iterations, 0);
        assert_eq!(prover.proof(), Some(vec![1, 3]));
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut prover = Prover::new(golden_problem(), ProverConfig::default());
        prover.cancel_handle().store(true, Ordering::Relaxed);
        assert_eq!(
            prover.prove().unwrap(),
            ProofResult::Inconclusive(StopReason::Cancelled)
        );
        assert_eq!(prover.proof(), None);
    }

    #[test]
    fn test_stats_are_counted() {
        let mut prover = Prover::new(golden_problem(), ProverConfig::default());
        prover.prove().unwrap();
        let stats = prover.stats();
        assert_eq!(stats.seeds, 1);
        assert_eq!(stats.normalized, 0);
        assert_eq!(stats.expanded, 3);
        assert_eq!(stats.clauses, 5);
        assert_eq!(stats.resolution.iterations, 2);
    }
}
