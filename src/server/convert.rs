//! Conversions between abacus native types and protobuf types.
//!
//! Requests coming off the wire may carry operation codes this build does not
//! know about, so proto → native request conversion is fallible. Everything
//! else converts infallibly.

use crate::{CalcError, CalculateRequest, CalculateResponse, Operation};

use super::proto;

// =============================================================================
// Operation
// =============================================================================

impl From<proto::Operation> for Operation {
    fn from(p: proto::Operation) -> Self {
        match p {
            proto::Operation::Unspecified => Operation::Unspecified,
            proto::Operation::Add => Operation::Add,
            proto::Operation::Subtract => Operation::Subtract,
            proto::Operation::Multiply => Operation::Multiply,
            proto::Operation::Divide => Operation::Divide,
        }
    }
}

impl From<Operation> for proto::Operation {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Unspecified => proto::Operation::Unspecified,
            Operation::Add => proto::Operation::Add,
            Operation::Subtract => proto::Operation::Subtract,
            Operation::Multiply => proto::Operation::Multiply,
            Operation::Divide => proto::Operation::Divide,
        }
    }
}

/// Decode a raw wire operation code.
pub fn operation_from_code(code: i32) -> Result<Operation, CalcError> {
    proto::Operation::try_from(code)
        .map(Into::into)
        .map_err(|_| CalcError::UnsupportedOperation(code.to_string()))
}

// =============================================================================
// From Proto → Native (incoming requests)
// =============================================================================

impl TryFrom<proto::CalculateRequest> for CalculateRequest {
    type Error = CalcError;

    fn try_from(p: proto::CalculateRequest) -> Result<Self, Self::Error> {
        Ok(CalculateRequest {
            left_operand: p.left_operand,
            right_operand: p.right_operand,
            operation: operation_from_code(p.operation)?,
        })
    }
}

impl From<proto::CalculateResponse> for CalculateResponse {
    fn from(p: proto::CalculateResponse) -> Self {
        CalculateResponse {
            result: p.result,
            error: p.error.filter(|e| !e.is_empty()),
        }
    }
}

// =============================================================================
// From Native → Proto (outgoing)
// =============================================================================

impl From<CalculateRequest> for proto::CalculateRequest {
    fn from(r: CalculateRequest) -> Self {
        proto::CalculateRequest {
            left_operand: r.left_operand,
            right_operand: r.right_operand,
            operation: proto::Operation::from(r.operation) as i32,
        }
    }
}

impl From<CalculateResponse> for proto::CalculateResponse {
    fn from(r: CalculateResponse) -> Self {
        proto::CalculateResponse {
            result: r.result,
            error: r.error,
        }
    }
}
