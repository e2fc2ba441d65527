//! Loading TPTP problems into a [`Problem`]
//!
//! Statements are parsed one at a time so that errors can name the line they
//! start on. `include` directives are resolved relative to the including
//! file, then each include directory in order, then `$TPTP`.

use super::syntax::{self, BinaryOp, Expr, RawTerm, Statement};
use crate::error::{ProverError, Result};
use crate::fol::{Connective, FormulaArena, FormulaId, Term};
use crate::problem::{FormulaRole, Problem};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse TPTP text; relative includes are looked up from the current directory
pub fn parse_tptp(input: &str, include_dirs: &[&str]) -> Result<Problem> {
    let mut loader = Loader::new(include_dirs);
    loader.load_str(input, Path::new("."), "<input>", None)?;
    Ok(loader.problem)
}

/// Parse a TPTP file and everything it includes
pub fn parse_tptp_file(path: impl AsRef<Path>, include_dirs: &[&str]) -> Result<Problem> {
    let mut loader = Loader::new(include_dirs);
    loader.load_file(path.as_ref(), None)?;
    Ok(loader.problem)
}

struct Loader<'a> {
    include_dirs: &'a [&'a str],
    /// Files currently being loaded, for cycle detection
    stack: Vec<PathBuf>,
    problem: Problem,
}

impl<'a> Loader<'a> {
    fn new(include_dirs: &'a [&'a str]) -> Self {
        Loader {
            include_dirs,
            stack: Vec::new(),
            problem: Problem::new(),
        }
    }

    fn load_file(&mut self, path: &Path, selection: Option<&[String]>) -> Result<()> {
        let canonical = fs::canonicalize(path)?;
        if self.stack.contains(&canonical) {
            return Err(ProverError::CircularInclude(path.display().to_string()));
        }
        let content = fs::read_to_string(&canonical)?;
        let current_dir = canonical.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(file = %path.display(), "loading TPTP file");

        self.stack.push(canonical);
        let result = self.load_str(&content, &current_dir, &path.display().to_string(), selection);
        self.stack.pop();
        result
    }

    fn load_str(
        &mut self,
        input: &str,
        current_dir: &Path,
        source: &str,
        selection: Option<&[String]>,
    ) -> Result<()> {
        let (mut rest, _) = syntax::ws(input).map_err(|e| parse_error(source, input, input, e))?;

        while !rest.is_empty() {
            let (after, statement) =
                syntax::statement(rest).map_err(|e| parse_error(source, input, rest, e))?;

            match statement {
                Statement::Include { file, selection: inner } => {
                    let path = self.find_include_file(&file, current_dir)?;
                    // An outer selection still restricts what an inner include contributes
                    let inner = inner.or_else(|| selection.map(<[String]>::to_vec));
                    self.load_file(&path, inner.as_deref())?;
                }
                Statement::Formula { name, role, body } => {
                    if selection.map_or(true, |names| names.contains(&name)) {
                        let formula = lower(&mut self.problem.arena, &body);
                        self.problem.add(name, FormulaRole::from_tptp(&role), formula);
                    }
                }
            }

            rest = syntax::ws(after).map_err(|e| parse_error(source, input, after, e))?.0;
        }
        Ok(())
    }

    fn find_include_file(&self, filename: &str, current_dir: &Path) -> Result<PathBuf> {
        let candidates = std::iter::once(current_dir.to_path_buf())
            .chain(self.include_dirs.iter().map(|dir| PathBuf::from(*dir)))
            .chain(env::var_os("TPTP").map(PathBuf::from));

        for dir in candidates {
            let path = dir.join(filename);
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(ProverError::IncludeNotFound(filename.to_string()))
    }
}

fn parse_error(
    source: &str,
    input: &str,
    statement: &str,
    err: nom::Err<nom::error::Error<&str>>,
) -> ProverError {
    let line = line_of(input, statement);
    let near = match &err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
        nom::Err::Incomplete(_) => statement,
    };
    let near: String = near.chars().take(40).collect();
    ProverError::Parse(format!("{}:{}: syntax error near `{}`", source, line, near.trim_end()))
}

/// 1-based line of the start of `rest` within `input`
fn line_of(input: &str, rest: &str) -> usize {
    let offset = input.len() - rest.len();
    input[..offset].matches('\n').count() + 1
}

/// Lower a syntax tree into the arena
fn lower(arena: &mut FormulaArena, expr: &Expr) -> FormulaId {
    match expr {
        Expr::Boolean(value) => arena.boolean(*value),
        Expr::Predicate(name, args) => {
            let args = args.iter().map(|t| lower_term(arena, t)).collect();
            arena.predicate(name, args)
        }
        Expr::Equal(left, right) => {
            let left = lower_term(arena, left);
            let right = lower_term(arena, right);
            arena.equality(left, right)
        }
        Expr::Not(inner) => {
            let inner = lower(arena, inner);
            arena.not(inner)
        }
        Expr::Binary(left, op, right) => {
            let left = lower(arena, left);
            let right = lower(arena, right);
            let connective = match op {
                BinaryOp::And => Connective::And,
                BinaryOp::Or => Connective::Or,
                BinaryOp::Implies => Connective::Implication,
                BinaryOp::ReverseImplies => Connective::ReverseImplication,
                BinaryOp::Equivalent => Connective::Equivalence,
                BinaryOp::Nand => Connective::Nand,
                BinaryOp::Nor => Connective::Nor,
                BinaryOp::NotEquivalent => {
                    let equivalence = arena.binary(left, Connective::Equivalence, right);
                    return arena.not(equivalence);
                }
            };
            arena.binary(left, connective, right)
        }
        Expr::Quantified(quantifier, variables, matrix) => {
            let mut formula = lower(arena, matrix);
            for name in variables.iter().rev() {
                let var = arena.interner_mut().intern_variable(name);
                formula = arena.quantified(*quantifier, var, formula);
            }
            formula
        }
    }
}

fn lower_term(arena: &mut FormulaArena, term: &RawTerm) -> Term {
    match term {
        RawTerm::Variable(name) => arena.variable(name),
        RawTerm::Apply(name, args) => {
            let args = args.iter().map(|t| lower_term(arena, t)).collect();
            arena.function(name, args)
        }
    }
}
