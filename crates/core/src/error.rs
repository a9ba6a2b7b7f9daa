//! Error taxonomy shared across the trading core.
//!
//! Risk denials are deliberately absent here: a rejected trade is a normal
//! result (`approved: false` with reasons), not an error path.

use thiserror::Error;

/// Errors produced by the indicator library, fusion engine, and ledger.
#[derive(Debug, Error)]
pub enum Error {
    /// A price series is shorter than the window an operation requires.
    /// Callers are expected to pre-validate; short input is never silently
    /// defaulted.
    #[error("insufficient data: required {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A caller-supplied value is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced transaction exists in neither the active index nor
    /// the archive.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation is not legal for the record's current status.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An injected collaborator refused the operation (payouts disabled,
    /// destination address rejected, governor missing).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Shorthand for an `InvalidState` error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
