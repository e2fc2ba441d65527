//! Derivation trace: numbered steps, proof extraction and text rendering

use crate::fol::{ClauseId, FormulaArena, FormulaId, Literals, Rule};
use crate::resolution::ClauseStore;
use std::collections::HashSet;
use std::fmt;

/// One committed clause, with premises given as trace indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// 1-based position in the trace
    pub index: usize,
    pub literals: Vec<FormulaId>,
    pub origin: Vec<usize>,
    pub rule: Rule,
}

impl TraceStep {
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// The whole trace of a clause store, in order of first introduction
pub fn trace_steps(store: &ClauseStore) -> Vec<TraceStep> {
    store
        .trace()
        .iter()
        .map(|&id| {
            let clause = store.get(id);
            TraceStep {
                index: store.trace_index(id),
                literals: clause.literals.as_slice().to_vec(),
                origin: clause.origin.iter().map(|&p| store.trace_index(p)).collect(),
                rule: clause.rule,
            }
        })
        .collect()
}

/// Trace indices of the clauses the empty clause depends on, ascending
///
/// Walks premises backwards from `empty`; parents always precede children in
/// the trace, so sorting by index gives a valid derivation order.
pub fn extract_proof(store: &ClauseStore, empty: ClauseId) -> Vec<usize> {
    let mut visited = HashSet::new();
    let mut proof = Vec::new();
    let mut to_visit = vec![empty];

    while let Some(id) = to_visit.pop() {
        if !visited.insert(id) {
            continue;
        }
        proof.push(store.trace_index(id));
        to_visit.extend(store.get(id).origin.iter().copied());
    }

    proof.sort_unstable();
    proof
}

/// Render steps as a numbered listing
///
/// ```text
/// 1. ~(p | ~p)  (negated conjecture)
/// 2. ~p         (from 1 by applying alpha1 rule)
/// ```
pub struct TraceDisplay<'a> {
    steps: &'a [TraceStep],
    arena: &'a FormulaArena,
}

impl<'a> TraceDisplay<'a> {
    pub fn new(steps: &'a [TraceStep], arena: &'a FormulaArena) -> Self {
        TraceDisplay { steps, arena }
    }
}

impl fmt::Display for TraceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texts: Vec<String> = self
            .steps
            .iter()
            .map(|step| {
                Literals::from_sorted(step.literals.clone())
                    .display(self.arena)
                    .to_string()
            })
            .collect();
        let index_width = self.steps.iter().map(|s| s.index.to_string().len()).max().unwrap_or(1);
        let literal_width = texts.iter().map(|t| t.chars().count()).max().unwrap_or(0) + 2;

        for (step, text) in self.steps.iter().zip(&texts) {
            writeln!(
                f,
                "{:>iw$}. {:<lw$}({})",
                step.index,
                text,
                annotation(step),
                iw = index_width,
                lw = literal_width
            )?;
        }
        Ok(())
    }
}

fn annotation(step: &TraceStep) -> String {
    if step.rule.is_input() || step.origin.is_empty() {
        return step.rule.human_readable().to_string();
    }
    format!("from {} by applying {}", join_indices(&step.origin), step.rule)
}

/// "1", "1 and 2", "1, 2 and 3"
fn join_indices(indices: &[usize]) -> String {
    match indices {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(|i| i.to_string()).collect();
            format!("{} and {}", head.join(", "), last)
        }
    }
}
