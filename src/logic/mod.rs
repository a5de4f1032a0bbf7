//! First-order clause data model
//!
//! Terms, literals, and clauses over a function-free language, with symbol
//! interning. This is the vocabulary shared by the pattern/target compilers
//! and the search engine.

pub mod clause;
pub mod interner;
pub mod literal;
pub mod term;

pub use clause::{Clause, ClauseDisplay};
pub use interner::{ConstantId, Interner, PredicateId, TypeId, VariableId};
pub use literal::{
    Literal, LiteralDisplay, LiteralKind, PredicateSymbol, SpecialOp, ALLDIFF,
    SPECIAL_BINARY_PREDICATES, SYMMETRIC_PREFIX,
};
pub use term::{Constant, Term, TermDisplay, Variable};
