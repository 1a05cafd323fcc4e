//! The in-process calculator.
//!
//! [`Calculator`] is a stateless unit struct: every call is a pure function
//! of its request, so one instance can be shared across any number of tasks.

use async_trait::async_trait;
use tracing::debug;

use crate::{CalcError, CalculateRequest, CalculateResponse, CalculatorApi, Operation, Result};

/// Performs the arithmetic behind the `Calculate` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    /// Apply the request's operation to its operands.
    ///
    /// Division by zero (either sign) fails with [`CalcError::DivisionByZero`];
    /// an unspecified operation fails with [`CalcError::UnsupportedOperation`].
    /// Everything else follows native `f64` semantics.
    pub fn evaluate(&self, request: &CalculateRequest) -> Result<f64> {
        let CalculateRequest {
            left_operand: left,
            right_operand: right,
            operation,
        } = *request;
        debug!(left, right, %operation, "evaluating");

        match operation {
            Operation::Add => Ok(left + right),
            Operation::Subtract => Ok(left - right),
            Operation::Multiply => Ok(left * right),
            Operation::Divide => {
                if right == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(left / right)
            }
            Operation::Unspecified => Err(CalcError::UnsupportedOperation(
                operation.proto_name().to_string(),
            )),
        }
    }
}

#[async_trait]
impl CalculatorApi for Calculator {
    async fn calculate(&self, request: CalculateRequest) -> Result<CalculateResponse> {
        self.evaluate(&request).map(CalculateResponse::ok)
    }
}
