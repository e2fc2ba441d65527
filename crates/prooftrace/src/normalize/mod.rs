//! First-order normalization: prenex form, Skolemization, universal drop
//!
//! Each pass is applied to every member of a clause. A pass that changes
//! something commits a new clause (tagged with the pass's rule, origin the
//! previous clause); a pass that changes nothing is skipped. After the last
//! pass every member is quantifier-free and the clause can be expanded
//! propositionally.

pub mod prenex;
pub mod skolem;

pub use prenex::{prenex, split_prefix, wrap};
pub use skolem::skolemize;

use crate::error::{ProverError, Result};
use crate::fol::{Clause, ClauseId, Formula, FormulaArena, FormulaId, Literals, Quantifier, Rule};
use crate::resolution::{Admission, ClauseStore};
use tracing::debug;

/// Strip a purely universal prefix
///
/// Any remaining quantifier, existential in the prefix or nested below it,
/// means Skolemization did not run and is reported as an error.
pub fn drop_universals(arena: &FormulaArena, formula: FormulaId) -> Result<FormulaId> {
    let mut current = formula;
    while let Formula::Quantified(quantifier, _, matrix) = arena.get(current) {
        if *quantifier != Quantifier::ForAll {
            return Err(ProverError::UnexpectedQuantifier(arena.display(formula).to_string()));
        }
        current = *matrix;
    }
    if arena.contains_quantifier(current) {
        return Err(ProverError::UnexpectedQuantifier(arena.display(formula).to_string()));
    }
    Ok(current)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Prenex,
    Skolemize,
    DropUniversals,
}

impl Pass {
    fn rule(self) -> Rule {
        match self {
            Pass::Prenex => Rule::Prenexing,
            Pass::Skolemize => Rule::Skolemization,
            Pass::DropUniversals => Rule::UniversalDrop,
        }
    }

    fn apply(self, arena: &mut FormulaArena, formula: FormulaId) -> Result<FormulaId> {
        match self {
            Pass::Prenex => Ok(prenex(arena, formula)),
            Pass::Skolemize => Ok(skolemize(arena, formula)),
            Pass::DropUniversals => drop_universals(arena, formula),
        }
    }
}

/// Whether any member of the clause needs first-order normalization
pub fn needs_normalization(arena: &FormulaArena, literals: &Literals) -> bool {
    literals.iter().any(|f| arena.contains_quantifier(f))
}

/// Run all three passes over a committed clause
///
/// Returns the clause to expand next, or `None` when a pass produced a
/// tautology or a literal set that is already known (and therefore handled
/// elsewhere).
pub fn normalize(arena: &mut FormulaArena, store: &mut ClauseStore, clause: ClauseId) -> Result<Option<ClauseId>> {
    let mut current = clause;
    for pass in [Pass::Prenex, Pass::Skolemize, Pass::DropUniversals] {
        let literals = store.get(current).literals.clone();
        let mut members = Vec::with_capacity(literals.len());
        for member in literals.iter() {
            members.push(pass.apply(arena, member)?);
        }
        if members.as_slice() == literals.as_slice() {
            continue;
        }

        let next = Literals::build(arena, members);
        if next.is_tautology(arena) {
            debug!(clause = store.trace_index(current), ?pass, "normalized to a tautology");
            return Ok(None);
        }
        match store.admit(Clause::new(next, pass.rule(), vec![current])) {
            Admission::New(id) => current = id,
            Admission::Seen(id) => {
                debug!(clause = store.trace_index(id), ?pass, "normalized clause already known");
                return Ok(None);
            }
        }
    }
    Ok(Some(current))
}
