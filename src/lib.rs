//! Abacus - a four-function calculator served over RPC
//!
//! The core is [`Calculator`], a stateless handler that applies an
//! [`Operation`] to two `f64` operands. With the `server` feature the same
//! handler is exposed as the `calculator.v1.CalculatorService` protobuf
//! service over gRPC (HTTP/2 cleartext), gRPC-Web and Connect JSON; with the
//! `client` feature [`client::ServiceClient`] calls it remotely.
//!
//! # Example
//!
//! ```rust
//! use abacus::{CalculateRequest, Calculator, Operation};
//!
//! let calc = Calculator::new();
//! let result = calc
//!     .evaluate(&CalculateRequest::new(30.0, Operation::Multiply, 5.0))
//!     .unwrap();
//! assert_eq!(result, 150.0);
//! ```
//!
//! # Remote Example (requires `client` feature)
//!
//! ```rust,no_run
//! use abacus::client::ServiceClient;
//! use abacus::{CalculateRequest, CalculatorApi, Operation};
//!
//! #[tokio::main]
//! async fn main() -> abacus::Result<()> {
//!     let client = ServiceClient::connect("http://127.0.0.1:8081").await?;
//!     let response = client
//!         .calculate(CalculateRequest::new(10.0, Operation::Divide, 4.0))
//!         .await?;
//!     println!("{}", response.result);
//!     Ok(())
//! }
//! ```

pub mod calculator;
#[cfg(feature = "client")]
pub mod client;
pub mod error;
#[cfg(any(feature = "server", feature = "client"))]
pub mod server;
pub mod telemetry;
pub mod traits;
pub mod types;
mod version;

// Re-export main types at crate root
pub use calculator::Calculator;
pub use error::{CalcError, Result};
pub use traits::CalculatorApi;
pub use types::{CalculateRequest, CalculateResponse, DIVISION_BY_ZERO_MESSAGE, Operation};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};
