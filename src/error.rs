//! Abacus error types

/// Abacus error types
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    // Request errors
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Transport errors
    #[error("transport error: {0}")]
    Transport(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CalcError {
    /// Whether the caller sent a request that can never succeed as-is.
    ///
    /// These map to the `InvalidArgument` status on every wire protocol.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CalcError::UnsupportedOperation(_)
                | CalcError::DivisionByZero
                | CalcError::InvalidInput(_)
                | CalcError::Json(_)
        )
    }
}

/// Result type alias for Abacus operations
pub type Result<T> = std::result::Result<T, CalcError>;

