//! RPC server and shared proto types.
//!
//! This module provides:
//! - Generated protobuf types (`proto`) used by both server and client
//! - Type conversions between native and proto types (`convert`)
//! - The gRPC service implementation (`service`, server-only)
//! - Connect JSON and CORS layers (`connect`, `cors`, server-only)
//! - Configuration types (`config`, server-only)
//!
//! # Transport
//!
//! One TCP listener serves every protocol. Native gRPC arrives as cleartext
//! HTTP/2; gRPC-Web and Connect JSON arrive as HTTP/1.1 from browsers, so
//! HTTP/1 is accepted too. Layers run outermost first:
//! CORS → Connect JSON → gRPC-Web → tonic routes.

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod connect;
pub mod convert;
#[cfg(feature = "server")]
pub mod cors;
#[cfg(feature = "server")]
pub mod service;

/// Re-exported generated proto types.
pub mod proto {
    tonic::include_proto!("calculator.v1");
}

#[cfg(feature = "server")]
pub use service::{CalculatorServiceImpl, Protocol};

#[cfg(feature = "server")]
pub use transport::{bind, serve};

#[cfg(feature = "server")]
mod transport {
    use std::future::Future;
    use std::sync::Arc;

    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::transport::Server;
    use tonic_web::GrpcWebLayer;
    use tracing::info;

    use super::config::Config;
    use super::connect::ConnectJsonLayer;
    use super::cors::build_cors_layer;
    use super::proto::calculator_service_server::CalculatorServiceServer;
    use super::service::CalculatorServiceImpl;
    use crate::{CalcError, CalculatorApi, Result};

    /// Bind the configured listen address.
    ///
    /// Accepts IP literals and resolvable host names (`localhost:8081`).
    pub async fn bind(address: &str) -> Result<TcpListener> {
        TcpListener::bind(address).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidInput => {
                CalcError::Configuration(format!("Invalid address {address:?}: {e}"))
            }
            _ => CalcError::Transport(format!("failed to bind {address:?}: {e}")),
        })
    }

    /// Serve `api` on `listener` until `shutdown` resolves.
    pub async fn serve<A, F>(
        config: &Config,
        api: Arc<A>,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<()>
    where
        A: CalculatorApi + 'static,
        F: Future<Output = ()>,
    {
        let service = CalculatorServiceImpl::new(api)
            .with_division_by_zero(config.service.division_by_zero);
        let cors = build_cors_layer(&config.server.cors)?;
        let limits = &config.server.limits;

        if let Ok(addr) = listener.local_addr() {
            info!(
                %addr,
                division_by_zero = ?service.division_by_zero(),
                "serving calculator.v1.CalculatorService"
            );
        }

        Server::builder()
            .accept_http1(true)
            .timeout(limits.request_timeout())
            .concurrency_limit_per_connection(limits.max_concurrent_requests)
            .layer(cors)
            .layer(ConnectJsonLayer::new(service.clone()))
            .layer(GrpcWebLayer::new())
            .add_service(CalculatorServiceServer::new(service))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await
            .map_err(|e| CalcError::Transport(e.to_string()))
    }
}
