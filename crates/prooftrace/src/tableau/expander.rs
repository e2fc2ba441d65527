//! Clause expansion
//!
//! Rewrites a clause into clauses whose members are all atoms or negated
//! atoms. Each step picks the first reducible member (in literal-set order)
//! and replaces it:
//!
//! - `$true` makes the whole clause a tautology, which is dropped
//! - `$false` is removed; `~$true` and `~$false` become `$false` and `$true`
//! - `~~A` becomes `A`
//! - an alpha member splits the clause in two, one per component
//! - a beta member is replaced by both components in the same clause
//!
//! Work is driven by an explicit queue rather than recursion, so nesting depth
//! of the input does not grow the stack. Every new clause is committed to the
//! shared [`ClauseStore`]; clauses whose literal set was already seen are not
//! expanded again.

use super::classify::{classify, FormulaClass};
use crate::error::{ProverError, Result};
use crate::fol::{Clause, ClauseId, FormulaArena, Literals, Rule};
use crate::resolution::{Admission, ClauseStore};
use std::collections::VecDeque;
use tracing::trace;

/// Result of expanding one clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Literal-only clauses, in the order they were reached
    Clauses(Vec<ClauseId>),
    /// The clause reduced to the empty clause under this handle
    Contradiction(ClauseId),
}

/// What one rewriting step did to a clause
enum Step {
    Tautology,
    Terminal,
    Derived(Vec<(Literals, Rule)>),
}

#[derive(Debug, Default)]
pub struct Expander {
    queue: VecDeque<ClauseId>,
    /// Clauses committed by expansion steps so far
    derived: usize,
}

impl Expander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derived(&self) -> usize {
        self.derived
    }

    /// Expand a committed clause into literal-only clauses
    pub fn expand(
        &mut self,
        arena: &mut FormulaArena,
        store: &mut ClauseStore,
        clause: ClauseId,
    ) -> Result<Expansion> {
        self.queue.clear();
        self.queue.push_back(clause);
        let mut finished = Vec::new();

        while let Some(current) = self.queue.pop_front() {
            let literals = store.get(current).literals.clone();
            match step(arena, &literals)? {
                Step::Tautology => {
                    trace!(clause = store.trace_index(current), "tautology dropped");
                }
                Step::Terminal => finished.push(current),
                Step::Derived(children) => {
                    for (literals, rule) in children {
                        if literals.is_tautology(arena) {
                            continue;
                        }
                        let empty = literals.is_empty();
                        match store.admit(Clause::new(literals, rule, vec![current])) {
                            Admission::New(id) => {
                                self.derived += 1;
                                if empty {
                                    return Ok(Expansion::Contradiction(id));
                                }
                                self.queue.push_back(id);
                            }
                            Admission::Seen(id) if empty => {
                                return Ok(Expansion::Contradiction(id));
                            }
                            Admission::Seen(_) => {}
                        }
                    }
                }
            }
        }

        Ok(Expansion::Clauses(finished))
    }
}

/// Apply the rule for the first reducible member of `literals`
fn step(arena: &mut FormulaArena, literals: &Literals) -> Result<Step> {
    for member in literals.iter() {
        let derived = match classify(arena, member) {
            FormulaClass::Atom | FormulaClass::NegatedAtom => continue,
            FormulaClass::Constant(true) => return Ok(Step::Tautology),
            FormulaClass::Constant(false) => {
                vec![(literals.without(member), Rule::BooleanSimplification)]
            }
            FormulaClass::NegatedConstant(value) => {
                let flipped = arena.boolean(!value);
                vec![(literals.replace(arena, member, &[flipped]), Rule::BooleanSimplification)]
            }
            FormulaClass::DoubleNegation(inner) => {
                vec![(literals.replace(arena, member, &[inner]), Rule::DoubleNegation)]
            }
            FormulaClass::Alpha(left, right) => vec![
                (literals.replace(arena, member, &[left]), Rule::AlphaLeft),
                (literals.replace(arena, member, &[right]), Rule::AlphaRight),
            ],
            FormulaClass::Beta(left, right) => {
                vec![(literals.replace(arena, member, &[left, right]), Rule::Beta)]
            }
            class @ (FormulaClass::Gamma(..) | FormulaClass::Delta(..)) => {
                return Err(ProverError::Classification {
                    formula: format!("{} ({})", arena.display(member), class.name()),
                    stage: "clause expansion",
                })
            }
        };
        return Ok(Step::Derived(derived));
    }
    Ok(Step::Terminal)
}
