//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of document or rule invariants.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no yaml document found")]
    EmptyDocument,

    #[error("invalid classifier rule '{pattern}': {reason}")]
    InvalidRule { pattern: String, reason: String },
}
