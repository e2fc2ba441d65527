//! Formula nodes
//!
//! Formulas are stored in a [`FormulaArena`](super::FormulaArena) and refer to
//! their children by [`FormulaId`]. Because the arena hash-conses every node,
//! two structurally identical formulas always share one ID.

use super::interner::{PredicateId, VariableId};
use super::term::Term;
use std::fmt;

/// Handle of an interned formula
///
/// Handles are assigned in interning order, which gives the total order used
/// for literal sets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormulaId(pub(crate) u32);

impl FormulaId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A predicate applied to terms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub predicate: PredicateId,
    pub args: Vec<Term>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connective {
    And,
    Or,
    Implication,
    /// `A <= B`, read as `B => A`
    ReverseImplication,
    Equivalence,
    Nand,
    Nor,
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
            Connective::Implication => "=>",
            Connective::ReverseImplication => "<=",
            Connective::Equivalence => "<=>",
            Connective::Nand => "~&",
            Connective::Nor => "~|",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quantifier {
    ForAll,
    Exists,
}

impl Quantifier {
    pub fn dual(self) -> Self {
        match self {
            Quantifier::ForAll => Quantifier::Exists,
            Quantifier::Exists => Quantifier::ForAll,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::ForAll => "!",
            Quantifier::Exists => "?",
        }
    }
}

/// One node of a formula tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Atomic(Atom),
    /// `$true` / `$false`
    Boolean(bool),
    Negation(FormulaId),
    Binary(FormulaId, Connective, FormulaId),
    Quantified(Quantifier, VariableId, FormulaId),
}

impl Formula {
    pub fn is_atomic(&self) -> bool {
        matches!(self, Formula::Atomic(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Formula::Boolean(_))
    }
}
