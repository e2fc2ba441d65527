//! Formula model: symbols, terms, hash-consed formulas and clauses

pub mod arena;
pub mod clause;
pub mod formula;
pub mod interner;
pub mod term;

pub use arena::{FormulaArena, FormulaDisplay};
pub use clause::{Clause, ClauseId, Literals, LiteralsDisplay, Rule};
pub use formula::{Atom, Connective, Formula, FormulaId, Quantifier};
pub use interner::{FunctionId, Interner, PredicateId, VariableId};
pub use term::{Term, TermDisplay};
