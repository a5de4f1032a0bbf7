//! Literals of the clause language
//!
//! A literal is a possibly negated predicate applied to an ordered list of
//! terms. Two families of predicate names carry built-in meaning:
//!
//! - *special* predicates are evaluated as constraints on the current
//!   grounding instead of being looked up in a target clause: the binary
//!   comparisons `@eq`, `@neq`, `@gt`, `@geq`, `@lt`, `@leq` and the vararg
//!   `@alldiff`;
//! - predicates whose name starts with [`SYMMETRIC_PREFIX`] are completely
//!   symmetric: membership is order-insensitive across argument permutations.
//!
//! Classification is resolved once, when a clause is compiled, into a
//! [`LiteralKind`] tag; the search never re-examines predicate names.

use crate::logic::interner::{Interner, PredicateId};
use crate::logic::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name prefix marking a completely symmetric predicate
pub const SYMMETRIC_PREFIX: &str = "sym";

/// Names of the built-in binary comparison predicates
pub const SPECIAL_BINARY_PREDICATES: [&str; 6] = ["@eq", "@neq", "@gt", "@geq", "@lt", "@leq"];

/// Name of the built-in vararg all-different predicate
pub const ALLDIFF: &str = "@alldiff";

/// A built-in constraint operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialOp {
    Eq,
    Neq,
    Gt,
    Geq,
    Lt,
    Leq,
    AllDiff,
}

impl SpecialOp {
    /// Classify a predicate name as a built-in operator, if it is one
    pub fn from_name(name: &str) -> Option<SpecialOp> {
        match name {
            "@eq" => Some(SpecialOp::Eq),
            "@neq" => Some(SpecialOp::Neq),
            "@gt" => Some(SpecialOp::Gt),
            "@geq" => Some(SpecialOp::Geq),
            "@lt" => Some(SpecialOp::Lt),
            "@leq" => Some(SpecialOp::Leq),
            "@alldiff" => Some(SpecialOp::AllDiff),
            _ => None,
        }
    }

    /// Binary operators require exactly two arguments; `@alldiff` any number
    pub fn is_binary(self) -> bool {
        !matches!(self, SpecialOp::AllDiff)
    }
}

/// Resolved predicate classification, computed once per literal at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Normal,
    Symmetric,
    Special(SpecialOp),
}

impl LiteralKind {
    /// Classify a predicate by its resolved name
    pub fn classify(name: &str) -> LiteralKind {
        if let Some(op) = SpecialOp::from_name(name) {
            LiteralKind::Special(op)
        } else if name.starts_with(SYMMETRIC_PREFIX) {
            LiteralKind::Symmetric
        } else {
            LiteralKind::Normal
        }
    }

    pub fn is_special(self) -> bool {
        matches!(self, LiteralKind::Special(_))
    }

    pub fn is_symmetric(self) -> bool {
        matches!(self, LiteralKind::Symmetric)
    }
}

/// A predicate symbol with arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub id: PredicateId,
    pub arity: u8,
}

impl PredicateSymbol {
    pub fn new(id: PredicateId, arity: u8) -> Self {
        PredicateSymbol { id, arity }
    }

    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_predicate(self.id)
    }
}

/// A literal (possibly negated atomic formula)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: PredicateSymbol,
    pub negated: bool,
    pub args: Vec<Term>,
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            negated: false,
            args,
        }
    }

    /// Create a new negated literal
    pub fn negative(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            negated: true,
            args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// The same literal with flipped sign
    pub fn negation(&self) -> Literal {
        Literal {
            predicate: self.predicate,
            negated: !self.negated,
            args: self.args.clone(),
        }
    }

    /// Classify this literal's predicate through the interner
    pub fn kind(&self, interner: &Interner) -> LiteralKind {
        LiteralKind::classify(self.predicate.name(interner))
    }

    /// Format this literal with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> LiteralDisplay<'a> {
        LiteralDisplay {
            literal: self,
            interner,
        }
    }
}

/// Display wrapper for Literal that includes an interner for name resolution
pub struct LiteralDisplay<'a> {
    literal: &'a Literal,
    interner: &'a Interner,
}

impl<'a> fmt::Display for LiteralDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literal.negated {
            write!(f, "!")?;
        }
        write!(f, "{}", self.literal.predicate.name(self.interner))?;
        if !self.literal.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.literal.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg.display(self.interner))?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "P{}(", self.predicate.id.as_u32())?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(
            LiteralKind::classify("@neq"),
            LiteralKind::Special(SpecialOp::Neq)
        );
        assert_eq!(
            LiteralKind::classify("@alldiff"),
            LiteralKind::Special(SpecialOp::AllDiff)
        );
        assert_eq!(LiteralKind::classify("symlink"), LiteralKind::Symmetric);
        assert_eq!(LiteralKind::classify("parent"), LiteralKind::Normal);
    }
}
