//! The subsumption/matching engine
//!
//! Compiled pattern and target representations, the randomized restart-based
//! search core, and the batch-matching orchestrator on top of it.

pub mod domain;
pub mod engine;
pub mod matching;
pub mod pattern;
pub mod target;

pub(crate) mod rng;
pub(crate) mod term_table;


pub use domain::TermSet;
pub use engine::{Outcome, SubsumptionEngine, Substitutions};
pub use matching::{Coverage, EvaluationStats, Matching};
pub use pattern::PatternStructure;
pub use target::TargetStructure;
