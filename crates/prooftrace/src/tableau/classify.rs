//! Rule classifier
//!
//! Sorts a formula into exactly one of the tableau categories and extracts its
//! components:
//!
//! | category | shapes | components |
//! |----------|--------|------------|
//! | alpha | `A & B`, `~(A \| B)`, `~(A => B)`, `~(A <= B)`, `A <=> B`, `~(A ~& B)`, `A ~\| B` | both must hold |
//! | beta | `A \| B`, `~(A & B)`, `A => B`, `A <= B`, `~(A <=> B)`, `A ~& B`, `~(A ~\| B)` | one must hold |
//! | double negation | `~~A` | `A` |
//! | gamma | `![X]: P`, `~?[X]: P` | `X`, `P` or `~P` |
//! | delta | `?[X]: P`, `~![X]: P` | `X`, `P` or `~P` |
//!
//! Everything else is a boolean constant, an atom, or the negation of one of
//! those. Components are negated where De Morgan's laws require it; negations
//! are always built by wrapping, so `~~A` may appear as a component and is
//! removed later by its own rule.

use crate::fol::{Connective, Formula, FormulaArena, FormulaId, Quantifier, VariableId};

/// Category of a formula with its extracted components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaClass {
    Constant(bool),
    /// `~$true` or `~$false`, carrying the inner value
    NegatedConstant(bool),
    Atom,
    NegatedAtom,
    DoubleNegation(FormulaId),
    Alpha(FormulaId, FormulaId),
    Beta(FormulaId, FormulaId),
    Gamma(VariableId, FormulaId),
    Delta(VariableId, FormulaId),
}

impl FormulaClass {
    pub fn name(&self) -> &'static str {
        match self {
            FormulaClass::Constant(_) => "constant",
            FormulaClass::NegatedConstant(_) => "negated constant",
            FormulaClass::Atom => "atom",
            FormulaClass::NegatedAtom => "negated atom",
            FormulaClass::DoubleNegation(_) => "double negation",
            FormulaClass::Alpha(..) => "alpha",
            FormulaClass::Beta(..) => "beta",
            FormulaClass::Gamma(..) => "gamma",
            FormulaClass::Delta(..) => "delta",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, FormulaClass::Atom | FormulaClass::NegatedAtom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    Alpha,
    Beta,
}

/// A component still to be built
#[derive(Debug, Clone, Copy)]
enum Part {
    Plain(FormulaId),
    Negated(FormulaId),
    Implies(FormulaId, FormulaId),
    NotImplies(FormulaId, FormulaId),
}

impl Part {
    fn build(self, arena: &mut FormulaArena) -> FormulaId {
        match self {
            Part::Plain(f) => f,
            Part::Negated(f) => arena.not(f),
            Part::Implies(a, b) => arena.implies(a, b),
            Part::NotImplies(a, b) => {
                let imp = arena.implies(a, b);
                arena.not(imp)
            }
        }
    }
}

/// Category and components of `a <connective> b`, or of its negation
fn split(connective: Connective, a: FormulaId, b: FormulaId, negated: bool) -> (Junction, Part, Part) {
    use Part::*;
    match (connective, negated) {
        (Connective::And, false) => (Junction::Alpha, Plain(a), Plain(b)),
        (Connective::Or, false) => (Junction::Beta, Plain(a), Plain(b)),
        (Connective::Implication, false) => (Junction::Beta, Negated(a), Plain(b)),
        (Connective::ReverseImplication, false) => (Junction::Beta, Plain(a), Negated(b)),
        (Connective::Equivalence, false) => (Junction::Alpha, Implies(a, b), Implies(b, a)),
        (Connective::Nand, false) => (Junction::Beta, Negated(a), Negated(b)),
        (Connective::Nor, false) => (Junction::Alpha, Negated(a), Negated(b)),
        (Connective::And, true) => (Junction::Beta, Negated(a), Negated(b)),
        (Connective::Or, true) => (Junction::Alpha, Negated(a), Negated(b)),
        (Connective::Implication, true) => (Junction::Alpha, Plain(a), Negated(b)),
        (Connective::ReverseImplication, true) => (Junction::Alpha, Negated(a), Plain(b)),
        (Connective::Equivalence, true) => (Junction::Beta, NotImplies(a, b), NotImplies(b, a)),
        (Connective::Nand, true) => (Junction::Alpha, Plain(a), Plain(b)),
        (Connective::Nor, true) => (Junction::Beta, Plain(a), Plain(b)),
    }
}

fn junction(arena: &FormulaArena, id: FormulaId) -> Option<(Junction, Part, Part)> {
    match arena.get(id) {
        Formula::Binary(a, connective, b) => Some(split(*connective, *a, *b, false)),
        Formula::Negation(inner) => match arena.get(*inner) {
            Formula::Binary(a, connective, b) => Some(split(*connective, *a, *b, true)),
            _ => None,
        },
        _ => None,
    }
}

/// Effective quantifier, bound variable, matrix, and whether the matrix must be negated
fn quantifier(arena: &FormulaArena, id: FormulaId) -> Option<(Quantifier, VariableId, FormulaId, bool)> {
    match arena.get(id) {
        Formula::Quantified(q, var, matrix) => Some((*q, *var, *matrix, false)),
        Formula::Negation(inner) => match arena.get(*inner) {
            Formula::Quantified(q, var, matrix) => Some((q.dual(), *var, *matrix, true)),
            _ => None,
        },
        _ => None,
    }
}

fn components(arena: &mut FormulaArena, id: FormulaId, kind: Junction) -> Option<(FormulaId, FormulaId)> {
    match junction(arena, id) {
        Some((found, left, right)) if found == kind => {
            let left = left.build(arena);
            let right = right.build(arena);
            Some((left, right))
        }
        _ => None,
    }
}

fn quantified(arena: &mut FormulaArena, id: FormulaId, kind: Quantifier) -> Option<(VariableId, FormulaId)> {
    match quantifier(arena, id) {
        Some((found, var, matrix, negate)) if found == kind => {
            let matrix = if negate { arena.not(matrix) } else { matrix };
            Some((var, matrix))
        }
        _ => None,
    }
}

pub fn is_alpha(arena: &FormulaArena, id: FormulaId) -> bool {
    matches!(junction(arena, id), Some((Junction::Alpha, ..)))
}

/// Both conjuncts of an alpha formula
pub fn alpha(arena: &mut FormulaArena, id: FormulaId) -> Option<(FormulaId, FormulaId)> {
    components(arena, id, Junction::Alpha)
}

pub fn is_beta(arena: &FormulaArena, id: FormulaId) -> bool {
    matches!(junction(arena, id), Some((Junction::Beta, ..)))
}

/// Both disjuncts of a beta formula
pub fn beta(arena: &mut FormulaArena, id: FormulaId) -> Option<(FormulaId, FormulaId)> {
    components(arena, id, Junction::Beta)
}

pub fn is_double_negation(arena: &FormulaArena, id: FormulaId) -> bool {
    double_negation(arena, id).is_some()
}

/// `A` for `~~A`
pub fn double_negation(arena: &FormulaArena, id: FormulaId) -> Option<FormulaId> {
    match arena.get(id) {
        Formula::Negation(inner) => match arena.get(*inner) {
            Formula::Negation(a) => Some(*a),
            _ => None,
        },
        _ => None,
    }
}

pub fn is_gamma(arena: &FormulaArena, id: FormulaId) -> bool {
    matches!(quantifier(arena, id), Some((Quantifier::ForAll, ..)))
}

/// Bound variable and matrix of a universally acting formula
pub fn gamma(arena: &mut FormulaArena, id: FormulaId) -> Option<(VariableId, FormulaId)> {
    quantified(arena, id, Quantifier::ForAll)
}

pub fn is_delta(arena: &FormulaArena, id: FormulaId) -> bool {
    matches!(quantifier(arena, id), Some((Quantifier::Exists, ..)))
}

/// Bound variable and matrix of an existentially acting formula
pub fn delta(arena: &mut FormulaArena, id: FormulaId) -> Option<(VariableId, FormulaId)> {
    quantified(arena, id, Quantifier::Exists)
}

/// Classify a formula, building whatever components its category needs
pub fn classify(arena: &mut FormulaArena, id: FormulaId) -> FormulaClass {
    let (node, negated) = match arena.get(id) {
        Formula::Negation(inner) => (arena.get(*inner).clone(), true),
        other => (other.clone(), false),
    };
    match (node, negated) {
        (Formula::Boolean(value), false) => FormulaClass::Constant(value),
        (Formula::Boolean(value), true) => FormulaClass::NegatedConstant(value),
        (Formula::Atomic(_), false) => FormulaClass::Atom,
        (Formula::Atomic(_), true) => FormulaClass::NegatedAtom,
        // Only reachable with `negated` set: the outer negation was peeled above
        (Formula::Negation(a), _) => FormulaClass::DoubleNegation(a),
        (Formula::Binary(a, connective, b), negated) => {
            let (kind, left, right) = split(connective, a, b, negated);
            let left = left.build(arena);
            let right = right.build(arena);
            match kind {
                Junction::Alpha => FormulaClass::Alpha(left, right),
                Junction::Beta => FormulaClass::Beta(left, right),
            }
        }
        (Formula::Quantified(q, var, matrix), negated) => {
            let (q, matrix) = if negated {
                (q.dual(), arena.not(matrix))
            } else {
                (q, matrix)
            };
            match q {
                Quantifier::ForAll => FormulaClass::Gamma(var, matrix),
                Quantifier::Exists => FormulaClass::Delta(var, matrix),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        arena: FormulaArena,
        a: FormulaId,
        b: FormulaId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut arena = FormulaArena::new();
            let a = arena.predicate("a", vec![]);
            let b = arena.predicate("b", vec![]);
            Fixture { arena, a, b }
        }

        fn bin(&mut self, connective: Connective) -> FormulaId {
            self.arena.binary(self.a, connective, self.b)
        }

        fn not(&mut self, f: FormulaId) -> FormulaId {
            self.arena.not(f)
        }

        fn text(&self, f: FormulaId) -> String {
            self.arena.display(f).to_string()
        }

        fn pair(&self, pair: (FormulaId, FormulaId)) -> (String, String) {
            (self.text(pair.0), self.text(pair.1))
        }
    }

    fn strs(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_alpha_shapes() {
        let mut fx = Fixture::new();
        let cases = [
            (Connective::And, false, ("a", "b")),
            (Connective::Or, true, ("~a", "~b")),
            (Connective::Implication, true, ("a", "~b")),
            (Connective::ReverseImplication, true, ("~a", "b")),
            (Connective::Equivalence, false, ("(a => b)", "(b => a)")),
            (Connective::Nand, true, ("a", "b")),
            (Connective::Nor, false, ("~a", "~b")),
        ];
        for (connective, negated, expected) in cases {
            let mut f = fx.bin(connective);
            if negated {
                f = fx.not(f);
            }
            assert!(is_alpha(&fx.arena, f), "{} should be alpha", fx.text(f));
            let parts = alpha(&mut fx.arena, f).unwrap();
            assert_eq!(fx.pair(parts), strs(expected.0, expected.1));
            assert_eq!(beta(&mut fx.arena, f), None);
        }
    }

    #[test]
    fn test_beta_shapes() {
        let mut fx = Fixture::new();
        let cases = [
            (Connective::Or, false, ("a", "b")),
            (Connective::And, true, ("~a", "~b")),
            (Connective::Implication, false, ("~a", "b")),
            (Connective::ReverseImplication, false, ("a", "~b")),
            (Connective::Equivalence, true, ("~(a => b)", "~(b => a)")),
            (Connective::Nand, false, ("~a", "~b")),
            (Connective::Nor, true, ("a", "b")),
        ];
        for (connective, negated, expected) in cases {
            let mut f = fx.bin(connective);
            if negated {
                f = fx.not(f);
            }
            assert!(is_beta(&fx.arena, f), "{} should be beta", fx.text(f));
            match classify(&mut fx.arena, f) {
                FormulaClass::Beta(left, right) => {
                    assert_eq!(fx.pair((left, right)), strs(expected.0, expected.1))
                }
                other => panic!("Expected beta, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_quantifier_flip_under_negation() {
        let mut fx = Fixture::new();
        let x_term = fx.arena.variable("X");
        let x = fx.arena.interner_mut().intern_variable("X");
        let p_x = fx.arena.predicate("p", vec![x_term]);

        let all = fx.arena.forall(x, p_x);
        let not_all = fx.not(all);
        let some = fx.arena.exists(x, p_x);
        let not_some = fx.not(some);

        assert_eq!(gamma(&mut fx.arena, all), Some((x, p_x)));
        assert!(is_delta(&fx.arena, not_all));
        let (var, matrix) = delta(&mut fx.arena, not_all).unwrap();
        assert_eq!(var, x);
        assert_eq!(fx.text(matrix), "~p(X)");

        assert_eq!(delta(&mut fx.arena, some), Some((x, p_x)));
        assert!(is_gamma(&fx.arena, not_some));
        assert_eq!(
            classify(&mut fx.arena, not_some),
            FormulaClass::Gamma(x, fx.arena.not(p_x))
        );
    }

    #[test]
    fn test_classification_is_exclusive() {
        let mut fx = Fixture::new();
        let x = fx.arena.interner_mut().intern_variable("X");
        let not_a = fx.not(fx.a);
        let not_not_a = fx.not(not_a);
        let not_true = fx.not(fx.arena.truth());
        let and = fx.bin(Connective::And);
        let or = fx.bin(Connective::Or);
        let not_or = fx.not(or);
        let all = fx.arena.forall(x, fx.a);
        let not_all = fx.not(all);

        let formulas = [
            fx.arena.truth(),
            fx.arena.falsity(),
            fx.a,
            not_a,
            not_not_a,
            not_true,
            and,
            or,
            not_or,
            all,
            not_all,
        ];
        for f in formulas {
            let checks = [
                is_alpha(&fx.arena, f),
                is_beta(&fx.arena, f),
                is_double_negation(&fx.arena, f),
                is_gamma(&fx.arena, f),
                is_delta(&fx.arena, f),
            ];
            let hits = checks.iter().filter(|&&hit| hit).count();
            let class = classify(&mut fx.arena, f);
            if matches!(
                class,
                FormulaClass::Constant(_)
                    | FormulaClass::NegatedConstant(_)
                    | FormulaClass::Atom
                    | FormulaClass::NegatedAtom
            ) {
                assert_eq!(hits, 0, "{} matched a rule", fx.text(f));
            } else {
                assert_eq!(hits, 1, "{} matched {} rules", fx.text(f), hits);
            }
        }

        assert_eq!(classify(&mut fx.arena, not_not_a), FormulaClass::DoubleNegation(fx.a));
        assert_eq!(classify(&mut fx.arena, not_true), FormulaClass::NegatedConstant(true));
        assert!(classify(&mut fx.arena, not_a).is_literal());
    }
}
