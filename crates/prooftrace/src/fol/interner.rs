//! Symbol interning
//!
//! Variables, function symbols (constants are 0-ary functions) and predicates
//! live in separate namespaces, each mapping a name to a dense `u32` ID.
//! The interner also hands out fresh names for Skolem symbols and for bound
//! variables renamed apart during prenexing.

use std::collections::HashMap;
use std::fmt;

/// ID for an interned variable name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) u32);

/// ID for an interned function or constant symbol
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub(crate) u32);

/// ID for an interned predicate symbol
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(pub(crate) u32);

impl VariableId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl FunctionId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl PredicateId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Names of one namespace, indexed by ID
#[derive(Debug, Clone, Default)]
struct SymbolTable {
    names: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl SymbolTable {
    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    fn resolve(&self, id: u32) -> &str {
        &self.names[id as usize]
    }

    fn get(&self, name: &str) -> Option<u32> {
        self.lookup.get(name).copied()
    }

    /// Intern the first `{prefix}{n}` (n counting up from `*counter`) not yet
    /// present, leaving the counter one past the chosen suffix
    fn fresh(&mut self, prefix: &str, counter: &mut usize) -> u32 {
        loop {
            let candidate = format!("{}{}", prefix, *counter);
            *counter += 1;
            if !self.lookup.contains_key(&candidate) {
                return self.intern(&candidate);
            }
        }
    }
}

/// Symbol interner for one problem
///
/// Owned by the formula arena and passed along with it; there is no global
/// symbol table.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    variables: SymbolTable,
    functions: SymbolTable,
    predicates: SymbolTable,
    skolem_counter: usize,
    rename_counter: usize,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    // === Variables ===

    pub fn intern_variable(&mut self, name: &str) -> VariableId {
        VariableId(self.variables.intern(name))
    }

    pub fn resolve_variable(&self, id: VariableId) -> &str {
        self.variables.resolve(id.0)
    }

    pub fn get_variable(&self, name: &str) -> Option<VariableId> {
        self.variables.get(name).map(VariableId)
    }

    /// A variable name not used anywhere in the problem so far, derived from `base`
    pub fn fresh_variable(&mut self, base: VariableId) -> VariableId {
        let prefix = format!("{}_", self.resolve_variable(base));
        VariableId(self.variables.fresh(&prefix, &mut self.rename_counter))
    }

    pub fn variable_count(&self) -> usize {
        self.variables.names.len()
    }

    // === Functions and constants ===

    pub fn intern_function(&mut self, name: &str) -> FunctionId {
        FunctionId(self.functions.intern(name))
    }

    pub fn resolve_function(&self, id: FunctionId) -> &str {
        self.functions.resolve(id.0)
    }

    pub fn get_function(&self, name: &str) -> Option<FunctionId> {
        self.functions.get(name).map(FunctionId)
    }

    /// Next Skolem symbol `skN`, skipping names the input already uses
    pub fn fresh_skolem(&mut self) -> FunctionId {
        FunctionId(self.functions.fresh("sk", &mut self.skolem_counter))
    }

    pub fn function_count(&self) -> usize {
        self.functions.names.len()
    }

    // === Predicates ===

    pub fn intern_predicate(&mut self, name: &str) -> PredicateId {
        PredicateId(self.predicates.intern(name))
    }

    pub fn resolve_predicate(&self, id: PredicateId) -> &str {
        self.predicates.resolve(id.0)
    }

    pub fn get_predicate(&self, name: &str) -> Option<PredicateId> {
        self.predicates.get(name).map(PredicateId)
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.names.len()
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
