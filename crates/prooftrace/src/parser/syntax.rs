//! nom grammar for the TPTP `fof`/`cnf` subset
//!
//! Produces a small syntax tree with symbol names still as strings; lowering
//! into the formula arena happens in [`super::tptp`]. Whitespace between
//! tokens may include `%` line comments and `/* */` block comments.
//!
//! Binary connectives are right-associative and share one precedence level.
//! TPTP requires parentheses when different binary connectives are mixed, so
//! this only decides the grouping of `&` and `|` chains.

use crate::fol::Quantifier;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::{char, digit1, multispace1, satisfy},
    combinator::{map, not, opt, recognize, value},
    multi::{many0_count, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTerm {
    Variable(String),
    /// Function application; constants have no arguments
    Apply(String, Vec<RawTerm>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Implies,
    ReverseImplies,
    Equivalent,
    /// `<~>`, lowered as a negated equivalence
    NotEquivalent,
    Nand,
    Nor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Boolean(bool),
    Predicate(String, Vec<RawTerm>),
    Equal(RawTerm, RawTerm),
    Not(Box<Expr>),
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
    /// One quantifier over a list of variables, outermost first
    Quantified(Quantifier, Vec<String>, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Formula { name: String, role: String, body: Expr },
    Include { file: String, selection: Option<Vec<String>> },
}

/// Whitespace and comments
pub fn ws(input: &str) -> IResult<&str, ()> {
    value((), many0_count(alt((multispace1, line_comment, block_comment))))(input)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('%'), take_while(|c| c != '\n')))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// A separator token surrounded by optional whitespace
fn sep<'a>(token: char) -> impl FnMut(&'a str) -> IResult<&'a str, ()> {
    value((), tuple((ws, char(token), ws)))
}

fn lower_word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_lowercase()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn upper_word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// `'...'` with `\'` and `\\` escapes; returns the unquoted text
fn single_quoted(input: &str) -> IResult<&str, String> {
    quoted('\'')(input)
}

/// `"..."` distinct object; the quotes are kept as part of the name
fn distinct_object(input: &str) -> IResult<&str, String> {
    map(quoted('"'), |text| format!("\"{}\"", text))(input)
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input: &'a str| {
        let (rest, _) = char(quote)(input)?;
        let mut text = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        text.push(escaped);
                    }
                }
                c if c == quote => return Ok((&rest[i + c.len_utf8()..], text)),
                c => text.push(c),
            }
        }
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )))
    }
}

/// Formula and function names: lower words, quoted atoms, integers
fn name(input: &str) -> IResult<&str, String> {
    alt((
        single_quoted,
        map(lower_word, str::to_string),
        map(digit1, str::to_string),
    ))(input)
}

fn functor(input: &str) -> IResult<&str, String> {
    alt((single_quoted, map(lower_word, str::to_string)))(input)
}

// === Terms ===

pub fn term(input: &str) -> IResult<&str, RawTerm> {
    alt((
        map(upper_word, |v| RawTerm::Variable(v.to_string())),
        application,
        map(digit1, |n: &str| RawTerm::Apply(n.to_string(), Vec::new())),
        map(distinct_object, |d| RawTerm::Apply(d, Vec::new())),
    ))(input)
}

fn application(input: &str) -> IResult<&str, RawTerm> {
    let (input, functor) = functor(input)?;
    let (input, args) = opt(arguments)(input)?;
    Ok((input, RawTerm::Apply(functor, args.unwrap_or_default())))
}

fn arguments(input: &str) -> IResult<&str, Vec<RawTerm>> {
    delimited(
        pair(char('('), ws),
        separated_list1(sep(','), term),
        pair(ws, char(')')),
    )(input)
}

// === Formulas ===

pub fn formula(input: &str) -> IResult<&str, Expr> {
    let (input, left) = unit_formula(input)?;
    let (after_ws, _) = ws(input)?;
    match binary_op(after_ws) {
        Ok((input, op)) => {
            let (input, _) = ws(input)?;
            let (input, right) = formula(input)?;
            Ok((input, Expr::Binary(Box::new(left), op, Box::new(right))))
        }
        Err(_) => Ok((input, left)),
    }
}

fn binary_op(input: &str) -> IResult<&str, BinaryOp> {
    alt((
        value(BinaryOp::Equivalent, tag("<=>")),
        value(BinaryOp::NotEquivalent, tag("<~>")),
        value(BinaryOp::Implies, tag("=>")),
        value(BinaryOp::ReverseImplies, tag("<=")),
        value(BinaryOp::Nand, tag("~&")),
        value(BinaryOp::Nor, tag("~|")),
        value(BinaryOp::Or, char('|')),
        value(BinaryOp::And, char('&')),
    ))(input)
}

fn unit_formula(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(pair(char('~'), ws), unit_formula), |f| Expr::Not(Box::new(f))),
        quantified,
        delimited(pair(char('('), ws), formula, pair(ws, char(')'))),
        atomic_formula,
    ))(input)
}

fn quantified(input: &str) -> IResult<&str, Expr> {
    let (input, quantifier) = alt((
        value(Quantifier::ForAll, char('!')),
        value(Quantifier::Exists, char('?')),
    ))(input)?;
    let (input, variables) = delimited(
        tuple((ws, char('['), ws)),
        separated_list1(sep(','), map(upper_word, str::to_string)),
        tuple((ws, char(']'), ws, char(':'), ws)),
    )(input)?;
    let (input, matrix) = unit_formula(input)?;
    Ok((input, Expr::Quantified(quantifier, variables, Box::new(matrix))))
}

fn atomic_formula(input: &str) -> IResult<&str, Expr> {
    alt((
        value(Expr::Boolean(true), terminated(tag("$true"), not(identifier_char))),
        value(Expr::Boolean(false), terminated(tag("$false"), not(identifier_char))),
        plain_or_equation,
    ))(input)
}

fn identifier_char(input: &str) -> IResult<&str, char> {
    satisfy(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// `p(...)`, `s = t` or `s != t`
fn plain_or_equation(input: &str) -> IResult<&str, Expr> {
    let (input, left) = term(input)?;
    let (after_ws, _) = ws(input)?;

    let equation: IResult<&str, bool> = alt((
        value(false, tag("!=")),
        value(true, terminated(char('='), not(char('>')))),
    ))(after_ws);
    if let Ok((rest, positive)) = equation {
        let (rest, _) = ws(rest)?;
        let (rest, right) = term(rest)?;
        let atom = Expr::Equal(left, right);
        return Ok((rest, if positive { atom } else { Expr::Not(Box::new(atom)) }));
    }

    match left {
        RawTerm::Apply(name, args) => Ok((input, Expr::Predicate(name, args))),
        // A lone variable is not a formula
        RawTerm::Variable(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        ))),
    }
}

// === Statements ===

pub fn statement(input: &str) -> IResult<&str, Statement> {
    alt((include, annotated("fof"), annotated("cnf")))(input)
}

fn annotated<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, Statement> {
    move |input: &'a str| {
        let (input, _) = tuple((tag(keyword), ws, char('('), ws))(input)?;
        let (input, name) = name(input)?;
        let (input, _) = sep(',')(input)?;
        let (input, role) = lower_word(input)?;
        let (input, _) = sep(',')(input)?;
        let (input, body) = formula(input)?;
        let (input, _) = ws(input)?;
        let (input, _) = opt(preceded(pair(char(','), ws), annotations))(input)?;
        let (input, _) = tuple((ws, char(')'), ws, char('.')))(input)?;
        Ok((
            input,
            Statement::Formula {
                name,
                role: role.to_string(),
                body,
            },
        ))
    }
}

fn include(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tuple((tag("include"), ws, char('('), ws))(input)?;
    let (input, file) = single_quoted(input)?;
    let (input, selection) = opt(preceded(
        sep(','),
        delimited(
            pair(char('['), ws),
            separated_list0(sep(','), name),
            pair(ws, char(']')),
        ),
    ))(input)?;
    let (input, _) = tuple((ws, char(')'), ws, char('.')))(input)?;
    Ok((input, Statement::Include { file, selection }))
}

/// Skip source and useful-info annotations up to the closing parenthesis
/// of the statement
fn annotations(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' if depth == 0 => return Ok((&input[i..], &input[..i])),
            ')' | ']' => depth -= 1,
            '\'' | '"' => {
                // Skip to the closing quote, honouring backslash escapes
                while let Some((_, q)) = chars.next() {
                    if q == '\\' {
                        chars.next();
                    } else if q == c {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> RawTerm {
        RawTerm::Variable(name.to_string())
    }

    fn constant(name: &str) -> RawTerm {
        RawTerm::Apply(name.to_string(), vec![])
    }

    fn pred(name: &str, args: Vec<RawTerm>) -> Expr {
        Expr::Predicate(name.to_string(), args)
    }

    #[test]
    fn test_comments_are_whitespace() {
        let (rest, _) = ws("  % line\n /* block\n comment */ fof").unwrap();
        assert_eq!(rest, "fof");
    }

    #[test]
    fn test_terms() {
        let (_, t) = term("f(X, g(a), 'Big name', 42)").unwrap();
        assert_eq!(
            t,
            RawTerm::Apply(
                "f".to_string(),
                vec![
                    var("X"),
                    RawTerm::Apply("g".to_string(), vec![constant("a")]),
                    constant("Big name"),
                    constant("42"),
                ]
            )
        );
    }

    #[test]
    fn test_equation_is_not_confused_with_implication() {
        let (rest, f) = formula("p => q").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            f,
            Expr::Binary(Box::new(pred("p", vec![])), BinaryOp::Implies, Box::new(pred("q", vec![])))
        );

        let (_, f) = formula("X != a").unwrap();
        assert_eq!(f, Expr::Not(Box::new(Expr::Equal(var("X"), constant("a")))));
    }

    #[test]
    fn test_quantifier_binds_tighter_than_connectives() {
        let (_, f) = formula("![X,Y]: p(X) & q").unwrap();
        match f {
            Expr::Binary(left, BinaryOp::And, _) => {
                assert!(matches!(*left, Expr::Quantified(Quantifier::ForAll, ref vs, _) if vs.len() == 2));
            }
            other => panic!("Expected conjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_negated_connectives() {
        let (_, f) = formula("a ~| b").unwrap();
        assert!(matches!(f, Expr::Binary(_, BinaryOp::Nor, _)));
        let (_, f) = formula("a ~& b").unwrap();
        assert!(matches!(f, Expr::Binary(_, BinaryOp::Nand, _)));
        let (_, f) = formula("a <~> b").unwrap();
        assert!(matches!(f, Expr::Binary(_, BinaryOp::NotEquivalent, _)));
        let (_, f) = formula("~ ~a").unwrap();
        assert_eq!(f, Expr::Not(Box::new(Expr::Not(Box::new(pred("a", vec![]))))));
    }

    #[test]
    fn test_boolean_constants_need_a_word_boundary() {
        let (_, f) = formula("$true | $false").unwrap();
        assert_eq!(
            f,
            Expr::Binary(Box::new(Expr::Boolean(true)), BinaryOp::Or, Box::new(Expr::Boolean(false)))
        );
        assert!(formula("$truest").is_err());
    }

    #[test]
    fn test_statement_with_annotations() {
        let input = "fof(ax1, hypothesis, p(a), file('x.p', ax1), [status(thm)]).";
        let (rest, st) = statement(input).unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            st,
            Statement::Formula {
                name: "ax1".to_string(),
                role: "hypothesis".to_string(),
                body: pred("p", vec![constant("a")]),
            }
        );
    }

    #[test]
    fn test_include_with_selection() {
        let (_, st) = statement("include('Axioms/SET001-0.ax', [a1, 'a 2']).").unwrap();
        assert_eq!(
            st,
            Statement::Include {
                file: "Axioms/SET001-0.ax".to_string(),
                selection: Some(vec!["a1".to_string(), "a 2".to_string()]),
            }
        );
    }

    #[test]
    fn test_lone_variable_is_rejected() {
        assert!(statement("fof(a, axiom, X).").is_err());
    }
}
