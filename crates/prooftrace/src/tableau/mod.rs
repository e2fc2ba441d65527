//! Tableau-style rules: formula classification and clause expansion

pub mod classify;
pub mod expander;


pub use classify::{
    alpha, beta, classify, delta, double_negation, gamma, is_alpha, is_beta, is_delta,
    is_double_negation, is_gamma, FormulaClass,
};
pub use expander::{Expander, Expansion};
