//! Terms of the clause language
//!
//! The language is function-free: a term is either a variable or a constant,
//! optionally annotated with a type. Identity is (kind, name, type): the
//! same name with two different type annotations denotes two distinct terms.

use crate::logic::interner::{ConstantId, Interner, TypeId, VariableId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical variable, optionally typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    pub type_id: Option<TypeId>,
}

impl Variable {
    pub fn new(id: VariableId) -> Self {
        Variable { id, type_id: None }
    }

    pub fn typed(id: VariableId, type_id: TypeId) -> Self {
        Variable {
            id,
            type_id: Some(type_id),
        }
    }

    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_variable(self.id)
    }
}

/// A constant symbol, optionally typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub id: ConstantId,
    pub type_id: Option<TypeId>,
}

impl Constant {
    pub fn new(id: ConstantId) -> Self {
        Constant { id, type_id: None }
    }

    pub fn typed(id: ConstantId, type_id: TypeId) -> Self {
        Constant {
            id,
            type_id: Some(type_id),
        }
    }

    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_constant(self.id)
    }
}

/// A term: variable or constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
}

impl Term {
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }

    /// Type annotation of the term, if any
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            Term::Variable(v) => v.type_id,
            Term::Constant(c) => c.type_id,
        }
    }

    /// Name of the term resolved through the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        match self {
            Term::Variable(v) => v.name(interner),
            Term::Constant(c) => c.name(interner),
        }
    }

    /// Format this term with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

/// Display wrapper for Term that includes an interner for name resolution
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(t) = self.term.type_id() {
            write!(f, "{}:", self.interner.resolve_type(t))?;
        }
        write!(f, "{}", self.term.name(self.interner))
    }
}

// Display implementations that show IDs (for debugging without interner)

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v.id),
            Term::Constant(c) => write!(f, "{}", c.id),
        }
    }
}
