//! Prenex normal form
//!
//! Quantifiers are pulled to the front by walking the formula with the
//! tableau classifier: alpha and beta components are prenexed independently
//! and their prefixes concatenated, left before right. Because the classifier
//! already reads `~![X]: P` as an existential over `~P` (and `~?[X]: P` as a
//! universal), the quantifier flip under negation needs no extra bookkeeping.
//!
//! A quantifier whose variable is already bound elsewhere in the prefix, or
//! occurs free in the formula, gets a fresh variable so that pulling it out
//! cannot capture anything.

use crate::fol::{Formula, FormulaArena, FormulaId, Quantifier, Term, VariableId};
use crate::tableau::{classify, FormulaClass};
use std::collections::HashSet;

/// Quantifier prefix, outermost first
pub type Prefix = Vec<(Quantifier, VariableId)>;

/// Prenex form of `formula`; quantifier-free input is returned unchanged
pub fn prenex(arena: &mut FormulaArena, formula: FormulaId) -> FormulaId {
    if !arena.contains_quantifier(formula) {
        return formula;
    }
    let mut used = arena.free_variables(formula);
    let (prefix, matrix) = pull(arena, formula, &mut used);
    wrap(arena, &prefix, matrix)
}

/// Split a formula in prenex form into its prefix and matrix
pub fn split_prefix(arena: &FormulaArena, formula: FormulaId) -> (Prefix, FormulaId) {
    let mut prefix = Vec::new();
    let mut current = formula;
    while let Formula::Quantified(q, var, matrix) = arena.get(current) {
        prefix.push((*q, *var));
        current = *matrix;
    }
    (prefix, current)
}

/// Re-attach a prefix, outermost first
pub fn wrap(arena: &mut FormulaArena, prefix: &[(Quantifier, VariableId)], matrix: FormulaId) -> FormulaId {
    prefix
        .iter()
        .rev()
        .fold(matrix, |inner, &(q, var)| arena.quantified(q, var, inner))
}

fn pull(arena: &mut FormulaArena, formula: FormulaId, used: &mut HashSet<VariableId>) -> (Prefix, FormulaId) {
    if !arena.contains_quantifier(formula) {
        return (Vec::new(), formula);
    }
    match classify(arena, formula) {
        FormulaClass::Alpha(left, right) => {
            let (mut prefix, left) = pull(arena, left, used);
            let (rest, right) = pull(arena, right, used);
            prefix.extend(rest);
            (prefix, arena.and(left, right))
        }
        FormulaClass::Beta(left, right) => {
            let (mut prefix, left) = pull(arena, left, used);
            let (rest, right) = pull(arena, right, used);
            prefix.extend(rest);
            (prefix, arena.or(left, right))
        }
        FormulaClass::DoubleNegation(inner) => pull(arena, inner, used),
        FormulaClass::Gamma(var, matrix) => bind(arena, Quantifier::ForAll, var, matrix, used),
        FormulaClass::Delta(var, matrix) => bind(arena, Quantifier::Exists, var, matrix, used),
        // Constants and literals hold no quantifier
        _ => (Vec::new(), formula),
    }
}

fn bind(
    arena: &mut FormulaArena,
    quantifier: Quantifier,
    var: VariableId,
    matrix: FormulaId,
    used: &mut HashSet<VariableId>,
) -> (Prefix, FormulaId) {
    let (var, matrix) = if used.insert(var) {
        (var, matrix)
    } else {
        let fresh = arena.interner_mut().fresh_variable(var);
        used.insert(fresh);
        (fresh, arena.substitute(matrix, var, &Term::Variable(fresh)))
    };
    let (mut prefix, matrix) = pull(arena, matrix, used);
    prefix.insert(0, (quantifier, var));
    (prefix, matrix)
}
