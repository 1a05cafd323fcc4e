//! [`ServiceClient`] — [`CalculatorApi`] implementation that connects to abacusd over gRPC.
//!
//! All proto ↔ native type conversions are centralized in [`crate::server::convert`].

use async_trait::async_trait;
use tonic::transport::Channel;

use crate::server::proto;
use crate::server::proto::calculator_service_client::CalculatorServiceClient;
use crate::{CalcError, CalculateRequest, CalculateResponse, CalculatorApi, Result};

/// A [`CalculatorApi`] client that connects to a remote abacusd server.
///
/// Cloning is cheap; clones share the underlying HTTP/2 connection.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    inner: CalculatorServiceClient<Channel>,
}

impl ServiceClient {
    /// Connect to an abacusd server at the given address.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = ServiceClient::connect("http://127.0.0.1:8081").await?;
    /// ```
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        let inner = CalculatorServiceClient::connect(addr.clone())
            .await
            .map_err(|e| CalcError::Transport(format!("failed to connect to {addr}: {e}")))?;
        Ok(Self { inner })
    }
}

/// Convert [`tonic::Status`] to [`CalcError`].
fn from_status(status: tonic::Status) -> CalcError {
    match status.code() {
        tonic::Code::InvalidArgument => CalcError::InvalidInput(status.message().to_string()),
        _ => CalcError::Transport(format!("{}: {}", status.code(), status.message())),
    }
}

#[async_trait]
impl CalculatorApi for ServiceClient {
    async fn calculate(&self, request: CalculateRequest) -> Result<CalculateResponse> {
        let request: proto::CalculateRequest = request.into();
        let response = self
            .inner
            .clone()
            .calculate(request)
            .await
            .map_err(from_status)?;
        Ok(response.into_inner().into())
    }
}
