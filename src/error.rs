//! Error types for clausematch

use thiserror::Error;

/// Errors raised at the crate boundary.
///
/// Refutation and budget exhaustion are *not* errors: they are ordinary
/// [`Outcome`](crate::subsumption::Outcome) values. Only malformed input and
/// caller-level contradictions abort an operation.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("malformed clause: {0}")]
    Malformed(String),

    #[error("contradictory clause: {0}")]
    Contradiction(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
