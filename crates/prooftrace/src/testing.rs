//! Random propositional formulas for property tests

use crate::fol::{Connective, Formula, FormulaArena, FormulaId};
use proptest::prelude::*;

pub const ATOMS: u8 = 4;

/// Formula description (before interning)
#[derive(Debug, Clone)]
pub enum FormulaDesc {
    Atom(u8), // atom index 0-3, named a0..a3
    Const(bool),
    Not(Box<FormulaDesc>),
    Binary(Box<FormulaDesc>, Connective, Box<FormulaDesc>),
}

fn arb_connective() -> impl Strategy<Value = Connective> {
    prop_oneof![
        3 => Just(Connective::And),
        3 => Just(Connective::Or),
        2 => Just(Connective::Implication),
        1 => Just(Connective::ReverseImplication),
        1 => Just(Connective::Equivalence),
        1 => Just(Connective::Nand),
        1 => Just(Connective::Nor),
    ]
}

pub fn arb_formula_desc(max_depth: u32) -> BoxedStrategy<FormulaDesc> {
    if max_depth == 0 {
        prop_oneof![
            8 => (0..ATOMS).prop_map(FormulaDesc::Atom),
            1 => any::<bool>().prop_map(FormulaDesc::Const),
        ]
        .boxed()
    } else {
        prop_oneof![
            4 => (0..ATOMS).prop_map(FormulaDesc::Atom),
            1 => any::<bool>().prop_map(FormulaDesc::Const),
            2 => arb_formula_desc(max_depth - 1).prop_map(|f| FormulaDesc::Not(Box::new(f))),
            4 => (arb_formula_desc(max_depth - 1), arb_connective(), arb_formula_desc(max_depth - 1))
                .prop_map(|(l, c, r)| FormulaDesc::Binary(Box::new(l), c, Box::new(r))),
        ]
        .boxed()
    }
}

fn atom_name(i: u8) -> String {
    format!("a{}", i)
}

/// Intern the atoms first, in ascending or descending order, so that the
/// literal order inside clauses can be flipped between two builds
pub fn fresh_arena(reverse_atoms: bool) -> FormulaArena {
    let mut arena = FormulaArena::new();
    let mut order: Vec<u8> = (0..ATOMS).collect();
    if reverse_atoms {
        order.reverse();
    }
    for i in order {
        let atom = arena.predicate(&atom_name(i), vec![]);
        arena.not(atom);
    }
    arena
}

pub fn build(arena: &mut FormulaArena, desc: &FormulaDesc) -> FormulaId {
    match desc {
        FormulaDesc::Atom(i) => arena.predicate(&atom_name(*i), vec![]),
        FormulaDesc::Const(value) => arena.boolean(*value),
        FormulaDesc::Not(inner) => {
            let inner = build(arena, inner);
            arena.not(inner)
        }
        FormulaDesc::Binary(left, connective, right) => {
            let left = build(arena, left);
            let right = build(arena, right);
            arena.binary(left, *connective, right)
        }
    }
}

/// Truth value under `assignment`, bit `i` giving atom `i`
pub fn eval(desc: &FormulaDesc, assignment: u8) -> bool {
    match desc {
        FormulaDesc::Atom(i) => assignment & (1 << i) != 0,
        FormulaDesc::Const(value) => *value,
        FormulaDesc::Not(inner) => !eval(inner, assignment),
        FormulaDesc::Binary(left, connective, right) => {
            let (a, b) = (eval(left, assignment), eval(right, assignment));
            match connective {
                Connective::And => a && b,
                Connective::Or => a || b,
                Connective::Implication => !a || b,
                Connective::ReverseImplication => a || !b,
                Connective::Equivalence => a == b,
                Connective::Nand => !(a && b),
                Connective::Nor => !(a || b),
            }
        }
    }
}

pub fn assignments() -> impl Iterator<Item = u8> {
    0..(1u8 << ATOMS)
}

pub fn is_valid(desc: &FormulaDesc) -> bool {
    assignments().all(|a| eval(desc, a))
}

pub fn is_satisfiable(desc: &FormulaDesc) -> bool {
    assignments().any(|a| eval(desc, a))
}

/// Swap the operands of every commutative connective
pub fn mirror(desc: &FormulaDesc) -> FormulaDesc {
    match desc {
        FormulaDesc::Atom(_) | FormulaDesc::Const(_) => desc.clone(),
        FormulaDesc::Not(inner) => FormulaDesc::Not(Box::new(mirror(inner))),
        FormulaDesc::Binary(left, connective, right) => {
            let (left, right) = (mirror(left), mirror(right));
            match connective {
                Connective::Implication | Connective::ReverseImplication => {
                    FormulaDesc::Binary(Box::new(left), *connective, Box::new(right))
                }
                _ => FormulaDesc::Binary(Box::new(right), *connective, Box::new(left)),
            }
        }
    }
}

/// Truth value of an atom or negated atom built by [`build`]
pub fn eval_literal(arena: &FormulaArena, literal: FormulaId, assignment: u8) -> bool {
    match arena.get(literal) {
        Formula::Negation(inner) => !eval_literal(arena, *inner, assignment),
        Formula::Atomic(atom) => {
            let name = arena.interner().resolve_predicate(atom.predicate);
            let index: u8 = name[1..].parse().unwrap();
            assignment & (1 << index) != 0
        }
        other => panic!("not a literal: {:?}", other),
    }
}
