//! Client library for connecting to abacusd.
//!
//! Provides [`ServiceClient`], which implements [`CalculatorApi`](crate::CalculatorApi)
//! by forwarding calls to a remote abacusd instance over gRPC.

mod service_client;

pub use service_client::ServiceClient;
