//! Engine error taxonomy.
//!
//! Every fallible operation in the engine reports one of these variants.
//! All errors are local to the operation that raised them except
//! [`EngineError::Corruption`], which invalidates the whole profile's
//! in-memory state and forces a reload from defaults.

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A read or write that may succeed on retry. Raised only after the
    /// bounded retry loop in the store has been exhausted.
    #[error("transient storage error: {0}")]
    TransientStorage(String),

    /// The durable store failed its integrity check on load.
    #[error("store corrupted: {0}")]
    Corruption(String),

    /// Malformed import data or out-of-range configuration. The operation
    /// is rejected whole; nothing is partially applied.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation referenced an unknown id.
    #[error("not found: {0}")]
    NotFound(String),

    /// A spend exceeded the currency balance. No mutation occurred.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(String),
}

impl From<DecodeError> for EngineError {
    fn from(err: DecodeError) -> Self {
        // A record that no longer decodes is a corrupt store, not a bug in
        // the caller.
        EngineError::Corruption(err.to_string())
    }
}

impl From<EncodeError> for EngineError {
    fn from(err: EncodeError) -> Self {
        EngineError::Encode(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Validation(err.to_string())
    }
}
