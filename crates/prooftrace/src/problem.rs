//! Input problems: annotated formulas sharing one formula arena

use crate::fol::{FormulaArena, FormulaId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// TPTP formula role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaRole {
    Axiom,
    Hypothesis,
    Definition,
    Assumption,
    Lemma,
    Theorem,
    Corollary,
    Conjecture,
    NegatedConjecture,
    Plain,
    Unknown,
}

impl FormulaRole {
    /// Role named in a TPTP annotated formula; unrecognized names map to `Unknown`
    pub fn from_tptp(name: &str) -> Self {
        match name {
            "axiom" => FormulaRole::Axiom,
            "hypothesis" => FormulaRole::Hypothesis,
            "definition" => FormulaRole::Definition,
            "assumption" => FormulaRole::Assumption,
            "lemma" => FormulaRole::Lemma,
            "theorem" => FormulaRole::Theorem,
            "corollary" => FormulaRole::Corollary,
            "conjecture" => FormulaRole::Conjecture,
            "negated_conjecture" => FormulaRole::NegatedConjecture,
            "plain" => FormulaRole::Plain,
            _ => FormulaRole::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormulaRole::Axiom => "axiom",
            FormulaRole::Hypothesis => "hypothesis",
            FormulaRole::Definition => "definition",
            FormulaRole::Assumption => "assumption",
            FormulaRole::Lemma => "lemma",
            FormulaRole::Theorem => "theorem",
            FormulaRole::Corollary => "corollary",
            FormulaRole::Conjecture => "conjecture",
            FormulaRole::NegatedConjecture => "negated_conjecture",
            FormulaRole::Plain => "plain",
            FormulaRole::Unknown => "unknown",
        }
    }

    /// Only conjectures are negated before the search; everything else,
    /// `negated_conjecture` included, is taken as given
    pub fn is_conjecture(self) -> bool {
        self == FormulaRole::Conjecture
    }
}

impl fmt::Display for FormulaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedFormula {
    pub name: String,
    pub role: FormulaRole,
    pub formula: FormulaId,
}

/// A set of annotated formulas and the arena that owns them
#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub arena: FormulaArena,
    pub formulas: Vec<AnnotatedFormula>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arena(arena: FormulaArena) -> Self {
        Problem {
            arena,
            formulas: Vec::new(),
        }
    }

    pub fn add(&mut self, name: impl Into<String>, role: FormulaRole, formula: FormulaId) {
        self.formulas.push(AnnotatedFormula {
            name: name.into(),
            role,
            formula,
        });
    }

    pub fn axiom(&mut self, name: impl Into<String>, formula: FormulaId) {
        self.add(name, FormulaRole::Axiom, formula);
    }

    pub fn conjecture(&mut self, name: impl Into<String>, formula: FormulaId) {
        self.add(name, FormulaRole::Conjecture, formula);
    }

    pub fn conjectures(&self) -> impl Iterator<Item = &AnnotatedFormula> {
        self.formulas.iter().filter(|f| f.role.is_conjecture())
    }

    pub fn axioms(&self) -> impl Iterator<Item = &AnnotatedFormula> {
        self.formulas.iter().filter(|f| !f.role.is_conjecture())
    }

    /// Whether any formula mentions a quantifier
    pub fn is_first_order(&self) -> bool {
        self.formulas
            .iter()
            .any(|f| self.arena.contains_quantifier(f.formula))
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}
