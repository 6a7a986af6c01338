use thiserror::Error;

/// Errors raised synchronously by the engine when a precondition is violated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Bad dimensions, a bias outside `[0, 1]`, a zero timescale or a malformed pattern.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Reconfiguration attempted while the clock is running, or a tick while idle.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
