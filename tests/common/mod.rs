//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use abacus::Calculator;
use abacus::server::config::{Config, DivisionByZeroPolicy};

/// Start an in-process abacusd on an ephemeral port and return its base URL.
///
/// The listener is bound before this returns, so callers can connect
/// immediately. The server runs until the test runtime shuts down.
pub async fn start_test_server(policy: DivisionByZeroPolicy) -> String {
    let mut config = Config::default();
    config.service.division_by_zero = policy;
    start_with_config(config).await
}

pub async fn start_with_config(config: Config) -> String {
    let listener = abacus::server::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        abacus::server::serve(
            &config,
            Arc::new(Calculator::new()),
            listener,
            std::future::pending(),
        )
        .await
        .unwrap();
    });

    format!("http://{addr}")
}
