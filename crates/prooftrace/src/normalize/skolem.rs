//! Skolemization of prenex formulas
//!
//! The prefix is read left to right. Universal variables are collected; each
//! existential variable is replaced in the rest of the formula by a fresh
//! Skolem function applied to the universals collected so far (a fresh
//! constant when there are none). Skolem names come from the interner, whose
//! counter is shared by the whole problem.

use super::prenex::wrap;
use crate::fol::{Formula, FormulaArena, FormulaId, Quantifier, Term};

/// Remove the existential quantifiers of a prenex formula
///
/// Formulas whose prefix is purely universal come back unchanged.
pub fn skolemize(arena: &mut FormulaArena, formula: FormulaId) -> FormulaId {
    let mut universals = Vec::new();
    let mut current = formula;
    let mut replaced = false;

    while let Formula::Quantified(quantifier, var, matrix) = arena.get(current).clone() {
        match quantifier {
            Quantifier::ForAll => {
                universals.push(var);
                current = matrix;
            }
            Quantifier::Exists => {
                let symbol = arena.interner_mut().fresh_skolem();
                let args = universals.iter().map(|&u| Term::Variable(u)).collect();
                current = arena.substitute(matrix, var, &Term::Function(symbol, args));
                replaced = true;
            }
        }
    }

    if !replaced {
        return formula;
    }
    let prefix: Vec<_> = universals.into_iter().map(|v| (Quantifier::ForAll, v)).collect();
    wrap(arena, &prefix, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::prenex::prenex;

    fn setup() -> FormulaArena {
        FormulaArena::new()
    }

    #[test]
    fn test_leading_existential_becomes_constant() {
        let mut arena = setup();
        let x = arena.interner_mut().intern_variable("X");
        let x_term = Term::Variable(x);
        let p = arena.predicate("p", vec![x_term]);
        let f = arena.exists(x, p);

        let result = skolemize(&mut arena, f);
        assert_eq!(arena.display(result).to_string(), "p(sk0)");
    }

    #[test]
    fn test_existential_under_universals_becomes_function() {
        // ![X]: ![Y]: ?[Z]: r(X,Y,Z)  ==>  ![X]: ![Y]: r(X,Y,sk0(X,Y))
        let mut arena = setup();
        let x = arena.interner_mut().intern_variable("X");
        let y = arena.interner_mut().intern_variable("Y");
        let z = arena.interner_mut().intern_variable("Z");
        let args = vec![Term::Variable(x), Term::Variable(y), Term::Variable(z)];
        let r = arena.predicate("r", args);
        let inner = arena.exists(z, r);
        let mid = arena.forall(y, inner);
        let f = arena.forall(x, mid);

        let result = skolemize(&mut arena, f);
        assert_eq!(arena.display(result).to_string(), "![X]: ![Y]: r(X,Y,sk0(X,Y))");
    }

    #[test]
    fn test_only_preceding_universals_are_arguments() {
        // ?[X]: ![Y]: ?[Z]: r(X,Y,Z)  ==>  ![Y]: r(sk0,Y,sk1(Y))
        let mut arena = setup();
        let x = arena.interner_mut().intern_variable("X");
        let y = arena.interner_mut().intern_variable("Y");
        let z = arena.interner_mut().intern_variable("Z");
        let args = vec![Term::Variable(x), Term::Variable(y), Term::Variable(z)];
        let r = arena.predicate("r", args);
        let inner = arena.exists(z, r);
        let mid = arena.forall(y, inner);
        let f = arena.exists(x, mid);

        let result = skolemize(&mut arena, f);
        assert_eq!(arena.display(result).to_string(), "![Y]: r(sk0,Y,sk1(Y))");
    }

    #[test]
    fn test_universal_prefix_is_unchanged() {
        let mut arena = setup();
        let x = arena.interner_mut().intern_variable("X");
        let p = arena.predicate("p", vec![Term::Variable(x)]);
        let f = arena.forall(x, p);
        assert_eq!(skolemize(&mut arena, f), f);
    }

    #[test]
    fn test_skolem_symbols_avoid_input_names() {
        let mut arena = setup();
        let x = arena.interner_mut().intern_variable("X");
        let sk0 = arena.constant("sk0");
        let p = arena.predicate("p", vec![Term::Variable(x), sk0]);
        let f = arena.exists(x, p);

        let result = skolemize(&mut arena, f);
        assert_eq!(arena.display(result).to_string(), "p(sk1,sk0)");
    }

    #[test]
    fn test_skolemize_after_prenex() {
        // ~(?[X]: ![Y]: r(X,Y))  ==>  ![X]: ?[Y]: ~r(X,Y)  ==>  ![X]: ~r(X,sk0(X))
        let mut arena = setup();
        let x = arena.interner_mut().intern_variable("X");
        let y = arena.interner_mut().intern_variable("Y");
        let r = arena.predicate("r", vec![Term::Variable(x), Term::Variable(y)]);
        let all = arena.forall(y, r);
        let some = arena.exists(x, all);
        let f = arena.not(some);

        let prenexed = prenex(&mut arena, f);
        let result = skolemize(&mut arena, prenexed);
        assert_eq!(arena.display(result).to_string(), "![X]: ~r(X,sk0(X))");
    }
}
