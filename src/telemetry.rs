//! Telemetry metric name constants.
//!
//! Centralised metric names for abacus operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `abacus_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — arithmetic operation (e.g. "add", "divide", "unspecified")
//! - `protocol` — wire protocol: "grpc" or "connect"
//! - `status` — outcome: "ok", "embedded_error" or "error"

/// Total `Calculate` requests served.
///
/// Labels: `operation`, `protocol`, `status` ("ok" | "embedded_error" | "error").
pub const REQUESTS_TOTAL: &str = "abacus_requests_total";

/// Request handling duration in seconds.
///
/// Labels: `operation`, `protocol`.
pub const REQUEST_DURATION_SECONDS: &str = "abacus_request_duration_seconds";
