//! clausematch: a randomized restart-based theta-subsumption engine
//!
//! This library decides *clause subsumption*: whether a substitution maps
//! every literal of a pattern clause into a target clause. Patterns and
//! targets are compiled once into integer-indexed structures with
//! shape-specialized membership indices; decisions run a depth-first CSP
//! search with forward checking, optional arc-consistency preprocessing, and
//! a restart loop under node and wall-clock budgets. A decision is one of
//! `Proved`, `Refuted`, or `Undecided`; budget exhaustion is an ordinary
//! outcome, never an error.
//!
//! ## Layers
//!
//! - [`logic`]: terms, literals, clauses over interned symbols
//! - [`parser`]: the Prolog-like textual clause syntax
//! - [`subsumption`]: compiled structures, the search engine, and the
//!   [`Matching`] orchestrator (batch coverage evaluation, isomorphism
//!   testing, theta-reduction)
//!
//! ## Example
//!
//! ```
//! use clausematch::{parse_clause, Interner, Matching, Outcome};
//!
//! let mut interner = Interner::new();
//! let pattern = parse_clause("p(X), q(X, Y)", &mut interner).unwrap();
//! let target = parse_clause("p(a), q(a, b)", &mut interner).unwrap();
//!
//! let mut matching = Matching::new();
//! let outcome = matching.subsumption(&pattern, &target, &interner).unwrap();
//! assert_eq!(outcome, Outcome::Proved);
//! ```

pub mod config;
pub mod error;
pub mod logic;
pub mod parser;
pub mod subsumption;

pub use config::{EngineConfig, RestartSequence, SubsumptionMode};
pub use error::MatchError;
pub use logic::{
    Clause, Constant, Interner, Literal, LiteralKind, PredicateSymbol, SpecialOp, Term, Variable,
};
pub use parser::parse_clause;
pub use subsumption::{
    Coverage, EvaluationStats, Matching, Outcome, PatternStructure, SubsumptionEngine,
    Substitutions, TargetStructure,
};
