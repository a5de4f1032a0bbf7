//! Parser for the Prolog-like clause syntax
//!
//! Grammar, whitespace-tolerant:
//!
//! ```text
//! clause   := literal (',' literal)*  |  <empty>
//! literal  := '!'? predicate ['(' term (',' term)* ')']
//! term     := [type ':'] name
//! ```
//!
//! Names starting with an uppercase letter or `_` are variables, everything
//! else is a constant. Predicate names may start with `@` (built-in
//! constraint predicates such as `@neq`). A `type:` prefix attaches a type
//! annotation to a term: `person:X`, `city:prague`.

use crate::error::MatchError;
use crate::logic::{Clause, Constant, Interner, Literal, PredicateSymbol, Term, Variable};
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// Raw (un-interned) term produced by the grammar
#[derive(Debug)]
struct RawTerm<'a> {
    type_name: Option<&'a str>,
    name: &'a str,
}

/// Raw literal produced by the grammar
#[derive(Debug)]
struct RawLiteral<'a> {
    negated: bool,
    predicate: &'a str,
    args: Vec<RawTerm<'a>>,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '@' || c == '-' || c == '.'
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(is_name_char)(input)
}

fn term(input: &str) -> IResult<&str, RawTerm<'_>> {
    map(
        pair(name, opt(preceded(char(':'), name))),
        |(first, second)| match second {
            Some(n) => RawTerm {
                type_name: Some(first),
                name: n,
            },
            None => RawTerm {
                type_name: None,
                name: first,
            },
        },
    )(input)
}

fn term_list(input: &str) -> IResult<&str, Vec<RawTerm<'_>>> {
    delimited(
        preceded(multispace0, char('(')),
        separated_list0(
            preceded(multispace0, char(',')),
            preceded(multispace0, term),
        ),
        preceded(multispace0, char(')')),
    )(input)
}

fn literal(input: &str) -> IResult<&str, RawLiteral<'_>> {
    map(
        tuple((opt(char('!')), preceded(multispace0, name), opt(term_list))),
        |(neg, predicate, args)| RawLiteral {
            negated: neg.is_some(),
            predicate,
            args: args.unwrap_or_default(),
        },
    )(input)
}

fn clause(input: &str) -> IResult<&str, Vec<RawLiteral<'_>>> {
    separated_list0(
        preceded(multispace0, char(',')),
        preceded(multispace0, literal),
    )(input)
}

/// Whether a raw name denotes a variable
fn is_variable_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_uppercase() || c == '_')
}

fn intern_term(raw: &RawTerm<'_>, interner: &mut Interner) -> Term {
    let type_id = raw.type_name.map(|t| interner.intern_type(t));
    if is_variable_name(raw.name) {
        let id = interner.intern_variable(raw.name);
        Term::Variable(Variable { id, type_id })
    } else {
        let id = interner.intern_constant(raw.name);
        Term::Constant(Constant { id, type_id })
    }
}

/// Parse a clause from its textual form, interning symbols as they appear.
///
/// The whole input must be consumed (apart from trailing whitespace); an
/// empty input yields the empty clause.
pub fn parse_clause(input: &str, interner: &mut Interner) -> Result<Clause, MatchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Clause::new(Vec::new()));
    }
    let (rest, raw_literals) =
        clause(trimmed).map_err(|e| MatchError::Parse(format!("{} in {:?}", e, input)))?;
    if !rest.trim().is_empty() {
        return Err(MatchError::Parse(format!(
            "trailing input {:?} in {:?}",
            rest, input
        )));
    }
    let mut literals = Vec::with_capacity(raw_literals.len());
    for raw in &raw_literals {
        let args: Vec<Term> = raw
            .args
            .iter()
            .map(|t| intern_term(t, interner))
            .collect();
        let predicate = PredicateSymbol::new(
            interner.intern_predicate(raw.predicate),
            args.len() as u8,
        );
        literals.push(Literal {
            predicate,
            negated: raw.negated,
            args,
        });
    }
    Ok(Clause::new(literals))
}
