//! Integration tests for gRPC service mode.
//!
//! Starts an in-process abacusd server and connects with a [`ServiceClient`],
//! validating the full round-trip through proto conversions.

#![cfg(all(feature = "server", feature = "client"))]

mod common;

use abacus::client::ServiceClient;
use abacus::server::config::DivisionByZeroPolicy;
use abacus::server::proto;
use abacus::server::proto::calculator_service_client::CalculatorServiceClient;
use abacus::{
    CalcError, CalculateRequest, CalculateResponse, CalculatorApi, DIVISION_BY_ZERO_MESSAGE,
    Operation,
};

use common::start_test_server;

#[tokio::test]
async fn test_client_connect() {
    let addr = start_test_server(DivisionByZeroPolicy::Status).await;
    let client = ServiceClient::connect(&addr).await;
    assert!(client.is_ok(), "failed to connect: {:?}", client.err());
}

#[tokio::test]
async fn test_client_connect_refused() {
    // Nothing listens on port 1.
    let result = ServiceClient::connect("http://127.0.0.1:1").await;
    assert!(matches!(result, Err(CalcError::Transport(_))));
}

#[tokio::test]
async fn test_scenarios() {
    let addr = start_test_server(DivisionByZeroPolicy::Status).await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let cases = [
        (20.0, Operation::Add, 10.0, 30.0),
        (10.0, Operation::Subtract, 5.0, 5.0),
        (30.0, Operation::Multiply, 5.0, 150.0),
        (10.0, Operation::Divide, 5.0, 2.0),
    ];
    for (left, op, right, expected) in cases {
        let response = client
            .calculate(CalculateRequest::new(left, op, right))
            .await
            .unwrap();
        assert_eq!(response, CalculateResponse::ok(expected), "{left} {op} {right}");
    }
}

#[tokio::test]
async fn test_divide_by_zero_status_policy() {
    let addr = start_test_server(DivisionByZeroPolicy::Status).await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let err = client
        .calculate(CalculateRequest::new(10.0, Operation::Divide, 0.0))
        .await
        .unwrap_err();
    assert!(
        matches!(err, CalcError::InvalidInput(ref m) if m == "division by zero"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_divide_by_zero_field_policy() {
    let addr = start_test_server(DivisionByZeroPolicy::Field).await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let response = client
        .calculate(CalculateRequest::new(10.0, Operation::Divide, 0.0))
        .await
        .unwrap();
    assert_eq!(response.error.as_deref(), Some(DIVISION_BY_ZERO_MESSAGE));
    assert_eq!(response.result, 0.0);
}

#[tokio::test]
async fn test_unspecified_operation() {
    let addr = start_test_server(DivisionByZeroPolicy::Field).await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let err = client
        .calculate(CalculateRequest::new(10.0, Operation::Unspecified, 5.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CalcError::InvalidInput(ref m) if m.contains("OPERATION_UNSPECIFIED")));
}

#[tokio::test]
async fn test_unknown_operation_code() {
    let addr = start_test_server(DivisionByZeroPolicy::Status).await;
    let mut raw = CalculatorServiceClient::connect(addr).await.unwrap();

    let status = raw
        .calculate(proto::CalculateRequest {
            left_operand: 1.0,
            right_operand: 2.0,
            operation: 17,
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
}

#[tokio::test]
async fn test_concurrent_calls() {
    let addr = start_test_server(DivisionByZeroPolicy::Status).await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let left = f64::from(i);
                let response = client
                    .calculate(CalculateRequest::new(left, Operation::Multiply, 2.0))
                    .await
                    .unwrap();
                assert_eq!(response.result, left * 2.0);
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
}

// ============================================================================
// Listener binding
// ============================================================================

#[tokio::test]
async fn test_bind_resolves_host_names() {
    let listener = abacus::server::bind("localhost:0").await;
    assert!(listener.is_ok(), "bind failed: {:?}", listener.err());
}

#[tokio::test]
async fn test_bind_rejects_malformed_address() {
    let err = abacus::server::bind("not-an-address").await.unwrap_err();
    assert!(matches!(err, CalcError::Configuration(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_server_on_localhost_name() {
    let mut config = abacus::server::config::Config::default();
    config.server.address = "localhost:0".to_string();
    let listener = abacus::server::bind(&config.server.address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        abacus::server::serve(
            &config,
            std::sync::Arc::new(abacus::Calculator::new()),
            listener,
            std::future::pending(),
        )
        .await
        .unwrap();
    });

    let client = ServiceClient::connect(format!("http://{addr}")).await.unwrap();
    let response = client
        .calculate(CalculateRequest::new(20.0, Operation::Add, 10.0))
        .await
        .unwrap();
    assert_eq!(response.result, 30.0);
}
