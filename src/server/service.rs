//! gRPC service implementation.
//!
//! [`CalculatorServiceImpl`] is shared by every wire protocol the server
//! speaks: tonic drives it for gRPC and gRPC-Web, and the Connect JSON layer
//! calls [`CalculatorServiceImpl::handle`] directly. Both paths therefore
//! apply the same division-by-zero policy and record the same metrics.

use std::sync::Arc;
use std::time::Instant;

use tonic::{Request, Response, Status};
use tracing::{debug, info};

use super::config::DivisionByZeroPolicy;
use super::convert::operation_from_code;
use super::proto;
use super::proto::calculator_service_server::CalculatorService;
use crate::{
    CalcError, CalculateRequest, CalculateResponse, CalculatorApi, DIVISION_BY_ZERO_MESSAGE,
    Result, telemetry,
};

/// Wire protocol a request arrived on, used for metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Native gRPC or gRPC-Web.
    Grpc,
    /// Connect unary JSON.
    Connect,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Grpc => "grpc",
            Protocol::Connect => "connect",
        }
    }
}

/// gRPC service that wraps a [`CalculatorApi`] implementation.
pub struct CalculatorServiceImpl<A: CalculatorApi> {
    api: Arc<A>,
    division_by_zero: DivisionByZeroPolicy,
}

impl<A: CalculatorApi> Clone for CalculatorServiceImpl<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            division_by_zero: self.division_by_zero,
        }
    }
}

impl<A: CalculatorApi> CalculatorServiceImpl<A> {
    /// Create a new service wrapping the given calculator.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            division_by_zero: DivisionByZeroPolicy::default(),
        }
    }

    /// Choose how division by zero is reported to callers.
    pub fn with_division_by_zero(mut self, policy: DivisionByZeroPolicy) -> Self {
        self.division_by_zero = policy;
        self
    }

    pub fn division_by_zero(&self) -> DivisionByZeroPolicy {
        self.division_by_zero
    }

    /// Serve one `Calculate` call received as a wire message.
    ///
    /// Unknown operation codes are rejected before reaching the calculator.
    /// With [`DivisionByZeroPolicy::Field`] a division by zero becomes a
    /// successful response carrying [`DIVISION_BY_ZERO_MESSAGE`].
    pub async fn handle(
        &self,
        request: proto::CalculateRequest,
        protocol: Protocol,
    ) -> Result<CalculateResponse> {
        let start = Instant::now();
        let operation = operation_from_code(request.operation)
            .map(|op| op.as_str())
            .unwrap_or("unknown");

        let outcome = match CalculateRequest::try_from(request) {
            Ok(request) => self.api.calculate(request).await,
            Err(e) => Err(e),
        };
        let outcome = match outcome {
            Err(CalcError::DivisionByZero)
                if self.division_by_zero == DivisionByZeroPolicy::Field =>
            {
                Ok(CalculateResponse::with_error(DIVISION_BY_ZERO_MESSAGE))
            }
            other => other,
        };

        let status = match &outcome {
            Ok(resp) if resp.is_error() => "embedded_error",
            Ok(_) => "ok",
            Err(_) => "error",
        };
        record_request(operation, protocol, start, status);

        match &outcome {
            Ok(resp) => debug!(operation, protocol = protocol.as_str(), result = resp.result, "calculated"),
            Err(e) => info!(operation, protocol = protocol.as_str(), error = %e, "calculation rejected"),
        }
        outcome
    }

    /// Account for a request that failed to decode before reaching
    /// [`handle`](Self::handle), and hand the error back.
    pub fn reject(&self, err: CalcError, protocol: Protocol) -> CalcError {
        record_request("unknown", protocol, Instant::now(), "error");
        info!(protocol = protocol.as_str(), error = %err, "request rejected");
        err
    }
}

/// Record request outcome metrics (counter + histogram).
fn record_request(operation: &'static str, protocol: Protocol, start: Instant, status: &'static str) {
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => operation,
        "protocol" => protocol.as_str(),
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "operation" => operation,
        "protocol" => protocol.as_str(),
    )
    .record(elapsed);
}

/// Convert [`CalcError`] to [`tonic::Status`].
impl From<CalcError> for Status {
    fn from(err: CalcError) -> Self {
        match err {
            err if err.is_invalid_argument() => Status::invalid_argument(err.to_string()),
            CalcError::Transport(msg) => Status::unavailable(msg),
            err => Status::internal(err.to_string()),
        }
    }
}

#[tonic::async_trait]
impl<A: CalculatorApi + 'static> CalculatorService for CalculatorServiceImpl<A> {
    async fn calculate(
        &self,
        request: Request<proto::CalculateRequest>,
    ) -> std::result::Result<Response<proto::CalculateResponse>, Status> {
        let response = self.handle(request.into_inner(), Protocol::Grpc).await?;
        Ok(Response::new(response.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Calculator, Operation};

    fn service(policy: DivisionByZeroPolicy) -> CalculatorServiceImpl<Calculator> {
        CalculatorServiceImpl::new(Arc::new(Calculator::new())).with_division_by_zero(policy)
    }

    fn wire(left: f64, op: Operation, right: f64) -> proto::CalculateRequest {
        CalculateRequest::new(left, op, right).into()
    }

    #[tokio::test]
    async fn handles_each_operation() {
        let svc = service(DivisionByZeroPolicy::Status);
        let cases = [
            (20.0, Operation::Add, 10.0, 30.0),
            (10.0, Operation::Subtract, 5.0, 5.0),
            (30.0, Operation::Multiply, 5.0, 150.0),
            (10.0, Operation::Divide, 5.0, 2.0),
        ];
        for (left, op, right, expected) in cases {
            let resp = svc.handle(wire(left, op, right), Protocol::Grpc).await.unwrap();
            assert_eq!(resp, CalculateResponse::ok(expected), "{left} {op} {right}");
        }
    }

    #[tokio::test]
    async fn division_by_zero_as_status() {
        let svc = service(DivisionByZeroPolicy::Status);
        let err = svc
            .handle(wire(10.0, Operation::Divide, 0.0), Protocol::Grpc)
            .await
            .unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero));
    }

    #[tokio::test]
    async fn division_by_zero_as_field() {
        let svc = service(DivisionByZeroPolicy::Field);
        let resp = svc
            .handle(wire(10.0, Operation::Divide, 0.0), Protocol::Grpc)
            .await
            .unwrap();
        assert_eq!(resp.error.as_deref(), Some(DIVISION_BY_ZERO_MESSAGE));
        assert_eq!(resp.result, 0.0);
    }

    #[tokio::test]
    async fn unspecified_fails_under_either_policy() {
        for policy in [DivisionByZeroPolicy::Status, DivisionByZeroPolicy::Field] {
            let err = service(policy)
                .handle(wire(10.0, Operation::Unspecified, 5.0), Protocol::Grpc)
                .await
                .unwrap_err();
            assert!(matches!(err, CalcError::UnsupportedOperation(_)));
        }
    }

    #[tokio::test]
    async fn unknown_code_fails() {
        let svc = service(DivisionByZeroPolicy::Status);
        let req = proto::CalculateRequest {
            left_operand: 1.0,
            right_operand: 1.0,
            operation: 99,
        };
        let err = svc.handle(req, Protocol::Connect).await.unwrap_err();
        assert!(matches!(err, CalcError::UnsupportedOperation(ref s) if s == "99"));
    }

    #[tokio::test]
    async fn tonic_entry_point_maps_errors_to_invalid_argument() {
        let svc = service(DivisionByZeroPolicy::Status);
        let status = CalculatorService::calculate(
            &svc,
            Request::new(wire(10.0, Operation::Divide, 0.0)),
        )
        .await
        .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "division by zero");
    }

    #[test]
    fn reject_returns_the_error() {
        let svc = service(DivisionByZeroPolicy::Status);
        let err = svc.reject(CalcError::InvalidInput("bad body".into()), Protocol::Connect);
        assert!(matches!(err, CalcError::InvalidInput(ref s) if s == "bad body"));
    }

    #[test]
    fn status_mapping() {
        let status: Status = CalcError::Transport("down".into()).into();
        assert_eq!(status.code(), tonic::Code::Unavailable);
        let status: Status = CalcError::Configuration("bad".into()).into();
        assert_eq!(status.code(), tonic::Code::Internal);
        let status: Status = CalcError::UnsupportedOperation("7".into()).into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }
}
