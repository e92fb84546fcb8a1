//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The transposition cache cannot be created with zero capacity.
    #[error("transposition cache capacity must be at least one entry")]
    InvalidCacheCapacity,

    /// An engine option was set to a value outside its declared range.
    #[error("invalid value {value:?} for option {name:?}")]
    InvalidOptionValue { name: String, value: String },

    /// A FEN string could not be parsed into a legal position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A move string was unparseable or not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}
