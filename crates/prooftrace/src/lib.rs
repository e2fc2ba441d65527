//! prooftrace: a resolution refutation prover with a readable derivation trace
//!
//! Input formulas are turned into clauses by tableau-style expansion
//! (alpha, beta and double-negation rules), after prenexing, Skolemizing and
//! stripping universal quantifiers from first-order formulas. The resulting
//! literal-only clauses are saturated by propositional resolution until the
//! empty clause appears or nothing new can be derived. Every clause committed
//! along the way is recorded in a numbered trace together with the rule and
//! premises that produced it.
//!
//! ```
//! use prooftrace::{parse_tptp, prove};
//!
//! let problem = parse_tptp("fof(em, conjecture, p | ~p).", &[]).unwrap();
//! assert!(prove(problem).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod fol;
pub mod json;
pub mod normalize;
pub mod parser;
pub mod problem;
pub mod prover;
pub mod resolution;
pub mod tableau;
pub mod trace;

#[cfg(test)]
mod testing;

pub use config::{ProverConfig, QueueOrder};
pub use error::{ProverError, Result};
pub use fol::{
    Clause, ClauseId, Connective, Formula, FormulaArena, FormulaId, Interner, Literals, Quantifier, Rule,
    Term,
};
pub use json::{ProofJson, TraceJson, TraceStepJson};
pub use parser::{parse_tptp, parse_tptp_file};
pub use problem::{AnnotatedFormula, FormulaRole, Problem};
pub use prover::{prove, ProofResult, Prover, ProverStats};
pub use resolution::{ClauseStore, StopReason};
pub use trace::{TraceDisplay, TraceStep};
