//! Core CalculatorApi trait

use async_trait::async_trait;

use crate::{CalculateRequest, CalculateResponse, Result};

/// Anything that can answer a `Calculate` call.
///
/// Implemented by the in-process [`Calculator`](crate::Calculator) and, with
/// the `client` feature, by [`ServiceClient`](crate::client::ServiceClient),
/// so consumers can switch between local and remote evaluation without code
/// changes.
#[async_trait]
pub trait CalculatorApi: Send + Sync {
    /// Apply `request.operation` to the request's operands.
    async fn calculate(&self, request: CalculateRequest) -> Result<CalculateResponse>;
}
