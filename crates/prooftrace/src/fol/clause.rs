//! Clauses: sets of literals with derivation metadata

use super::arena::FormulaArena;
use super::formula::FormulaId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable handle of a clause in the clause store, assigned at creation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseId(pub(crate) usize);

impl ClauseId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// How a clause was obtained
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Axiom,
    /// The negated conjecture(s)
    Conjecture,
    AlphaLeft,
    AlphaRight,
    Beta,
    DoubleNegation,
    BooleanSimplification,
    Prenexing,
    Skolemization,
    UniversalDrop,
    Resolution,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Axiom => "axiom",
            Rule::Conjecture => "conjecture",
            Rule::AlphaLeft => "alpha_left",
            Rule::AlphaRight => "alpha_right",
            Rule::Beta => "beta",
            Rule::DoubleNegation => "double_negation",
            Rule::BooleanSimplification => "boolean_simplification",
            Rule::Prenexing => "prenexing",
            Rule::Skolemization => "skolemization",
            Rule::UniversalDrop => "universal_drop",
            Rule::Resolution => "resolution",
        }
    }

    pub fn human_readable(self) -> &'static str {
        match self {
            Rule::Axiom => "axiom",
            Rule::Conjecture => "negated conjecture",
            Rule::AlphaLeft => "alpha1 rule",
            Rule::AlphaRight => "alpha2 rule",
            Rule::Beta => "beta rule",
            Rule::DoubleNegation => "double negation rule",
            Rule::BooleanSimplification => "boolean simplification",
            Rule::Prenexing => "prenex normal form",
            Rule::Skolemization => "skolemization",
            Rule::UniversalDrop => "universal quantifier removal",
            Rule::Resolution => "resolution rule",
        }
    }

    /// Input clauses have no premises
    pub fn is_input(self) -> bool {
        matches!(self, Rule::Axiom | Rule::Conjecture)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_readable())
    }
}

/// A literal set, kept sorted and duplicate-free
///
/// Two sets built from the same members in any order are equal and hash
/// equally. A set that would hold some formula together with its complement,
/// or that holds `$true`, is collapsed to the tautology `{$true}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Literals(Vec<FormulaId>);

impl Literals {
    pub fn empty() -> Self {
        Literals(Vec::new())
    }

    pub fn tautology(arena: &FormulaArena) -> Self {
        Literals(vec![arena.truth()])
    }

    /// Build a set, collapsing complementary members to `{$true}`
    pub fn build(arena: &FormulaArena, members: impl IntoIterator<Item = FormulaId>) -> Self {
        let mut literals = Literals::empty();
        for member in members {
            if !literals.insert(arena, member) {
                return Literals::tautology(arena);
            }
        }
        literals
    }

    /// Wrap members that are already sorted and duplicate-free
    pub(crate) fn from_sorted(members: Vec<FormulaId>) -> Self {
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));
        Literals(members)
    }

    /// Insert one member; returns false if the set became a tautology
    ///
    /// On false the set is left in an unspecified state and must be replaced
    /// by `{$true}`.
    fn insert(&mut self, arena: &FormulaArena, member: FormulaId) -> bool {
        if member == arena.truth() {
            return false;
        }
        if let Some(complement) = arena.complement_of(member) {
            if self.contains(complement) {
                return false;
            }
        }
        if let Err(pos) = self.0.binary_search(&member) {
            self.0.insert(pos, member);
        }
        true
    }

    /// This set with `old` removed and `new` members added, collapsing as needed
    pub fn replace(&self, arena: &FormulaArena, old: FormulaId, new: &[FormulaId]) -> Self {
        let kept = self.0.iter().copied().filter(|&f| f != old);
        Literals::build(arena, kept.chain(new.iter().copied()))
    }

    pub fn without(&self, member: FormulaId) -> Self {
        Literals(self.0.iter().copied().filter(|&f| f != member).collect())
    }

    pub fn contains(&self, member: FormulaId) -> bool {
        self.0.binary_search(&member).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_tautology(&self, arena: &FormulaArena) -> bool {
        self.0.len() == 1 && self.0[0] == arena.truth()
    }

    /// Empty, or the single literal `$false`
    pub fn is_contradiction(&self, arena: &FormulaArena) -> bool {
        self.0.is_empty() || (self.0.len() == 1 && self.0[0] == arena.falsity())
    }

    pub fn iter(&self) -> impl Iterator<Item = FormulaId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[FormulaId] {
        &self.0
    }

    pub fn display<'a>(&'a self, arena: &'a FormulaArena) -> LiteralsDisplay<'a> {
        LiteralsDisplay {
            literals: self,
            arena,
        }
    }
}

/// A clause: literal set plus provenance
///
/// Equality and hashing look at the literal set only.
#[derive(Debug, Clone)]
pub struct Clause {
    pub literals: Literals,
    pub origin: Vec<ClauseId>,
    pub rule: Rule,
    /// 1-based trace position once committed
    pub index: Option<usize>,
}

impl Clause {
    pub fn new(literals: Literals, rule: Rule, origin: Vec<ClauseId>) -> Self {
        Clause {
            literals,
            origin,
            rule,
            index: None,
        }
    }

    pub fn input(literals: Literals, rule: Rule) -> Self {
        Clause::new(literals, rule, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.literals == other.literals
    }
}

impl Eq for Clause {}

impl Hash for Clause {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.literals.hash(state);
    }
}

pub struct LiteralsDisplay<'a> {
    literals: &'a Literals,
    arena: &'a FormulaArena,
}

impl fmt::Display for LiteralsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "$false");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", self.arena.display(lit))?;
        }
        Ok(())
    }
}
