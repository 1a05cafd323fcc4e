//! Request and response types for the `Calculate` call.

use serde::{Deserialize, Serialize};

use super::Operation;

/// Text placed in [`CalculateResponse::error`] when a division by zero is
/// reported inside the response rather than as a protocol error.
///
/// Existing web clients display this string verbatim.
pub const DIVISION_BY_ZERO_MESSAGE: &str = "除数不能为零";

/// Two operands and the operation to apply to them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub left_operand: f64,
    pub right_operand: f64,
    pub operation: Operation,
}

impl CalculateRequest {
    pub fn new(left_operand: f64, operation: Operation, right_operand: f64) -> Self {
        Self {
            left_operand,
            right_operand,
            operation,
        }
    }
}

/// Outcome of a `Calculate` call.
///
/// Exactly one of `result` and `error` is meaningful: when `error` is set,
/// `result` is `0.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub result: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculateResponse {
    /// A successful response carrying `result`.
    pub fn ok(result: f64) -> Self {
        Self {
            result,
            error: None,
        }
    }

    /// A response reporting `message` in its error field.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            result: 0.0,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
