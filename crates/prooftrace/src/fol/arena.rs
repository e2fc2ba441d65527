//! Hash-consing arena for formulas
//!
//! Every formula node is interned exactly once: building the same node twice
//! returns the same [`FormulaId`]. Set membership and literal lookup across
//! the prover therefore reduce to integer comparisons.
//!
//! The arena also owns the symbol [`Interner`], so a problem is fully
//! described by one arena plus the list of its top-level formula IDs.

use super::formula::{Atom, Connective, Formula, FormulaId, Quantifier};
use super::interner::{Interner, PredicateId, VariableId};
use super::term::Term;
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const EQUALITY: &str = "=";

#[derive(Debug, Clone)]
pub struct FormulaArena {
    interner: Interner,
    nodes: Vec<Formula>,
    lookup: HashMap<Formula, FormulaId>,
}

impl Default for FormulaArena {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaArena {
    /// Create an arena; `$true` and `$false` always get the first two IDs
    pub fn new() -> Self {
        let mut arena = FormulaArena {
            interner: Interner::new(),
            nodes: Vec::new(),
            lookup: HashMap::new(),
        };
        arena.intern(Formula::Boolean(true));
        arena.intern(Formula::Boolean(false));
        arena
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    /// Get-or-create the ID of a node
    pub fn intern(&mut self, node: Formula) -> FormulaId {
        if let Some(&id) = self.lookup.get(&node) {
            return id;
        }
        let id = FormulaId(self.nodes.len() as u32);
        self.nodes.push(node.clone());
        self.lookup.insert(node, id);
        id
    }

    /// ID of a node if it has been built before
    pub fn find(&self, node: &Formula) -> Option<FormulaId> {
        self.lookup.get(node).copied()
    }

    pub fn get(&self, id: FormulaId) -> &Formula {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Builders ===

    pub fn truth(&self) -> FormulaId {
        FormulaId(0)
    }

    pub fn falsity(&self) -> FormulaId {
        FormulaId(1)
    }

    pub fn boolean(&self, value: bool) -> FormulaId {
        if value {
            self.truth()
        } else {
            self.falsity()
        }
    }

    pub fn atom(&mut self, predicate: PredicateId, args: Vec<Term>) -> FormulaId {
        self.intern(Formula::Atomic(Atom { predicate, args }))
    }

    /// Atom by predicate name; `$true` and `$false` become boolean constants
    pub fn predicate(&mut self, name: &str, args: Vec<Term>) -> FormulaId {
        match (name, args.is_empty()) {
            ("$true", true) => self.truth(),
            ("$false", true) => self.falsity(),
            _ => {
                let predicate = self.interner.intern_predicate(name);
                self.atom(predicate, args)
            }
        }
    }

    pub fn equality(&mut self, left: Term, right: Term) -> FormulaId {
        self.predicate(EQUALITY, vec![left, right])
    }

    pub fn variable(&mut self, name: &str) -> Term {
        Term::Variable(self.interner.intern_variable(name))
    }

    pub fn function(&mut self, name: &str, args: Vec<Term>) -> Term {
        Term::Function(self.interner.intern_function(name), args)
    }

    pub fn constant(&mut self, name: &str) -> Term {
        self.function(name, Vec::new())
    }

    /// Wrap in a negation; never simplifies `~~A`
    pub fn not(&mut self, f: FormulaId) -> FormulaId {
        self.intern(Formula::Negation(f))
    }

    pub fn binary(&mut self, left: FormulaId, connective: Connective, right: FormulaId) -> FormulaId {
        self.intern(Formula::Binary(left, connective, right))
    }

    pub fn and(&mut self, left: FormulaId, right: FormulaId) -> FormulaId {
        self.binary(left, Connective::And, right)
    }

    pub fn or(&mut self, left: FormulaId, right: FormulaId) -> FormulaId {
        self.binary(left, Connective::Or, right)
    }

    pub fn implies(&mut self, left: FormulaId, right: FormulaId) -> FormulaId {
        self.binary(left, Connective::Implication, right)
    }

    pub fn quantified(&mut self, quantifier: Quantifier, var: VariableId, matrix: FormulaId) -> FormulaId {
        self.intern(Formula::Quantified(quantifier, var, matrix))
    }

    pub fn forall(&mut self, var: VariableId, matrix: FormulaId) -> FormulaId {
        self.quantified(Quantifier::ForAll, var, matrix)
    }

    pub fn exists(&mut self, var: VariableId, matrix: FormulaId) -> FormulaId {
        self.quantified(Quantifier::Exists, var, matrix)
    }

    // === Queries ===

    /// Atom or negated atom (boolean constants excluded)
    pub fn is_literal(&self, id: FormulaId) -> bool {
        match self.get(id) {
            Formula::Atomic(_) => true,
            Formula::Negation(inner) => self.get(*inner).is_atomic(),
            _ => false,
        }
    }

    /// Syntactic complement: strips one negation, otherwise wraps
    pub fn complement(&mut self, id: FormulaId) -> FormulaId {
        match self.get(id) {
            Formula::Negation(inner) => *inner,
            _ => self.not(id),
        }
    }

    /// Complement of `id` if it exists in the arena
    ///
    /// A complement that was never built cannot be a member of any clause, so
    /// lookups never need to intern.
    pub fn complement_of(&self, id: FormulaId) -> Option<FormulaId> {
        match self.get(id) {
            Formula::Negation(inner) => Some(*inner),
            _ => self.find(&Formula::Negation(id)),
        }
    }

    pub fn contains_quantifier(&self, id: FormulaId) -> bool {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.get(current) {
                Formula::Quantified(..) => return true,
                Formula::Negation(inner) => stack.push(*inner),
                Formula::Binary(left, _, right) => {
                    stack.push(*left);
                    stack.push(*right);
                }
                Formula::Atomic(_) | Formula::Boolean(_) => {}
            }
        }
        false
    }

    /// Variables occurring outside the scope of any quantifier binding them
    pub fn free_variables(&self, id: FormulaId) -> HashSet<VariableId> {
        let mut free = HashSet::new();
        self.collect_free(id, &mut Vec::new(), &mut free);
        free
    }

    fn collect_free(&self, id: FormulaId, bound: &mut Vec<VariableId>, free: &mut HashSet<VariableId>) {
        match self.get(id) {
            Formula::Atomic(atom) => {
                for arg in &atom.args {
                    collect_term_variables(arg, bound, free);
                }
            }
            Formula::Boolean(_) => {}
            Formula::Negation(inner) => self.collect_free(*inner, bound, free),
            Formula::Binary(left, _, right) => {
                self.collect_free(*left, bound, free);
                self.collect_free(*right, bound, free);
            }
            Formula::Quantified(_, var, matrix) => {
                bound.push(*var);
                self.collect_free(*matrix, bound, free);
                bound.pop();
            }
        }
    }

    /// Replace free occurrences of `var` with `replacement`
    ///
    /// Stops below a quantifier that rebinds `var`.
    pub fn substitute(&mut self, id: FormulaId, var: VariableId, replacement: &Term) -> FormulaId {
        match self.get(id).clone() {
            Formula::Atomic(atom) => {
                if !atom.args.iter().any(|t| t.contains_variable(var)) {
                    return id;
                }
                let args = atom.args.iter().map(|t| t.substitute(var, replacement)).collect();
                self.atom(atom.predicate, args)
            }
            Formula::Boolean(_) => id,
            Formula::Negation(inner) => {
                let inner = self.substitute(inner, var, replacement);
                self.not(inner)
            }
            Formula::Binary(left, connective, right) => {
                let left = self.substitute(left, var, replacement);
                let right = self.substitute(right, var, replacement);
                self.binary(left, connective, right)
            }
            Formula::Quantified(_, bound, _) if bound == var => id,
            Formula::Quantified(quantifier, bound, matrix) => {
                let matrix = self.substitute(matrix, var, replacement);
                self.quantified(quantifier, bound, matrix)
            }
        }
    }

    pub fn display(&self, id: FormulaId) -> FormulaDisplay<'_> {
        FormulaDisplay { arena: self, id }
    }
}

fn collect_term_variables(term: &Term, bound: &[VariableId], free: &mut HashSet<VariableId>) {
    match term {
        Term::Variable(v) if !bound.contains(v) => {
            free.insert(*v);
        }
        Term::Variable(_) => {}
        Term::Function(_, args) => {
            for arg in args {
                collect_term_variables(arg, bound, free);
            }
        }
    }
}

/// TPTP-style rendering of an interned formula
pub struct FormulaDisplay<'a> {
    arena: &'a FormulaArena,
    id: FormulaId,
}

impl FormulaDisplay<'_> {
    fn child(&self, id: FormulaId) -> Self {
        FormulaDisplay {
            arena: self.arena,
            id,
        }
    }

    fn is_equality(&self, atom: &Atom) -> bool {
        atom.args.len() == 2 && self.arena.interner.resolve_predicate(atom.predicate) == EQUALITY
    }
}

impl fmt::Display for FormulaDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = &self.arena.interner;
        match self.arena.get(self.id) {
            Formula::Atomic(atom) if self.is_equality(atom) => write!(
                f,
                "{} = {}",
                atom.args[0].display(interner),
                atom.args[1].display(interner)
            ),
            Formula::Atomic(atom) => {
                write!(f, "{}", interner.resolve_predicate(atom.predicate))?;
                if !atom.args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in atom.args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg.display(interner))?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            Formula::Boolean(true) => write!(f, "$true"),
            Formula::Boolean(false) => write!(f, "$false"),
            Formula::Negation(inner) => match self.arena.get(*inner) {
                Formula::Atomic(atom) if self.is_equality(atom) => {
                    write!(f, "~({})", self.child(*inner))
                }
                _ => write!(f, "~{}", self.child(*inner)),
            },
            Formula::Binary(left, connective, right) => {
                write!(f, "(")?;
                for (i, side) in [*left, *right].into_iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", connective)?;
                    }
                    if matches!(self.arena.get(side), Formula::Quantified(..)) {
                        write!(f, "({})", self.child(side))?;
                    } else {
                        write!(f, "{}", self.child(side))?;
                    }
                }
                write!(f, ")")
            }
            Formula::Quantified(quantifier, var, matrix) => write!(
                f,
                "{}[{}]: {}",
                quantifier.symbol(),
                interner.resolve_variable(*var),
                self.child(*matrix)
            ),
        }
    }
}
