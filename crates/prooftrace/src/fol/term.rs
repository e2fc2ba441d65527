//! Terms in first-order logic

use super::interner::{FunctionId, Interner, VariableId};
use std::fmt;

/// A variable or a function symbol applied to arguments
///
/// Constants are functions with no arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Variable(VariableId),
    Function(FunctionId, Vec<Term>),
}

impl Term {
    pub fn constant(id: FunctionId) -> Self {
        Term::Function(id, Vec::new())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Function(_, args) if args.is_empty())
    }

    pub fn contains_variable(&self, var: VariableId) -> bool {
        match self {
            Term::Variable(v) => *v == var,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }

    /// Replace every occurrence of `var` with `replacement`
    pub fn substitute(&self, var: VariableId, replacement: &Term) -> Term {
        match self {
            Term::Variable(v) if *v == var => replacement.clone(),
            Term::Variable(_) => self.clone(),
            Term::Function(f, args) => Term::Function(
                *f,
                args.iter().map(|arg| arg.substitute(var, replacement)).collect(),
            ),
        }
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

/// Display wrapper resolving symbol names through an interner
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Variable(v) => write!(f, "{}", self.interner.resolve_variable(*v)),
            Term::Function(func, args) => {
                write!(f, "{}", self.interner.resolve_function(*func))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg.display(self.interner))?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_nested() {
        let mut interner = Interner::new();
        let x = interner.intern_variable("X");
        let y = interner.intern_variable("Y");
        let f = interner.intern_function("f");
        let a = Term::constant(interner.intern_function("a"));

        let term = Term::Function(f, vec![Term::Variable(x), Term::Variable(y)]);
        let result = term.substitute(x, &a);

        assert_eq!(result, Term::Function(f, vec![a.clone(), Term::Variable(y)]));
        assert!(!result.contains_variable(x));
        assert!(result.contains_variable(y));
        assert_eq!(result.display(&interner).to_string(), "f(a,Y)");
    }

    #[test]
    fn test_constant_has_no_arguments() {
        let mut interner = Interner::new();
        let c = Term::constant(interner.intern_function("c"));
        assert!(c.is_constant());
        assert!(!c.is_variable());
        assert_eq!(c.display(&interner).to_string(), "c");
    }
}
