//! Error taxonomy for the calculation engine
//!
//! Every failure is recoverable by the caller: fix the input, supply more data,
//! or surface the message. Nothing in the engine panics on bad input.

use thiserror::Error;

/// Result alias used across the engine
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors returned by engine operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Caller-correctable input problem (negative amount, negative rate, bad date range)
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A projection needs data the caller did not supply
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A computation stopped at a limit: the simulation ceiling, or a value
    /// leaving the decimal range
    #[error("computation limit reached: {reason}")]
    ComputationLimit { reason: String },
}

impl EngineError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn insufficient(message: impl Into<String>) -> Self {
        EngineError::InsufficientData(message.into())
    }

    /// Simulation ceiling reached with debts still open
    pub fn ceiling(months: u32) -> Self {
        EngineError::ComputationLimit {
            reason: format!("debts not paid off within {} months", months),
        }
    }

    /// Decimal arithmetic overflowed while computing `what`
    pub fn overflow(what: impl std::fmt::Display) -> Self {
        EngineError::ComputationLimit {
            reason: format!("arithmetic overflow while computing {}", what),
        }
    }

    pub fn is_computation_limit(&self) -> bool {
        matches!(self, EngineError::ComputationLimit { .. })
    }

    /// True for errors the caller fixes by changing the input values
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. })
    }
}
