//! Connect unary JSON support.
//!
//! Browser clients written against the Connect protocol POST a JSON body to
//! the same path the gRPC method lives on:
//!
//! ```text
//! POST /calculator.v1.CalculatorService/Calculate
//! Content-Type: application/json
//! Connect-Protocol-Version: 1
//!
//! {"left_operand": 20, "right_operand": 10, "operation": 1}
//! ```
//!
//! [`ConnectJsonLayer`] answers those requests itself and passes everything
//! else (gRPC, gRPC-Web, preflights) to the inner service untouched. Errors
//! use the Connect error body `{"code": "...", "message": "..."}` with the
//! matching HTTP status.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use serde::Deserialize;
use serde_json::{Value, json};
use tonic::body::Body;
use tower::{Layer, Service};

use super::proto;
use super::service::{CalculatorServiceImpl, Protocol};
use crate::{CalcError, CalculateResponse, CalculatorApi};

/// Path of the `Calculate` method, shared by every protocol.
pub const CALCULATE_PATH: &str = "/calculator.v1.CalculatorService/Calculate";

/// Largest JSON body accepted, matching tonic's default decode limit.
pub const MAX_REQUEST_BYTES: usize = 4 * 1024 * 1024;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Tower layer that serves Connect JSON calls to `Calculate`.
pub struct ConnectJsonLayer<A: CalculatorApi> {
    service: CalculatorServiceImpl<A>,
}

impl<A: CalculatorApi> ConnectJsonLayer<A> {
    pub fn new(service: CalculatorServiceImpl<A>) -> Self {
        Self { service }
    }
}

impl<A: CalculatorApi> Clone for ConnectJsonLayer<A> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S, A: CalculatorApi> Layer<S> for ConnectJsonLayer<A> {
    type Service = ConnectJsonService<S, A>;

    fn layer(&self, inner: S) -> Self::Service {
        ConnectJsonService {
            inner,
            service: self.service.clone(),
        }
    }
}

/// Service produced by [`ConnectJsonLayer`].
pub struct ConnectJsonService<S, A: CalculatorApi> {
    inner: S,
    service: CalculatorServiceImpl<A>,
}

impl<S: Clone, A: CalculatorApi> Clone for ConnectJsonService<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            service: self.service.clone(),
        }
    }
}

impl<S, A> Service<Request<Body>> for ConnectJsonService<S, A>
where
    S: Service<Request<Body>, Response = Response<Body>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    A: CalculatorApi + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if !is_connect_json(&req) {
            return Box::pin(self.inner.call(req));
        }
        let service = self.service.clone();
        Box::pin(async move { Ok(serve_json(service, req).await) })
    }
}

/// Whether `req` is a Connect unary JSON call to `Calculate`.
fn is_connect_json<B>(req: &Request<B>) -> bool {
    req.method() == Method::POST
        && req.uri().path() == CALCULATE_PATH
        && req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"))
}

async fn serve_json<A: CalculatorApi>(
    service: CalculatorServiceImpl<A>,
    req: Request<Body>,
) -> Response<Body> {
    let outcome = match decode_request(req.into_body()).await {
        Ok(wire) => service.handle(wire, Protocol::Connect).await,
        Err(e) => Err(service.reject(e, Protocol::Connect)),
    };
    match outcome {
        Ok(resp) => json_response(StatusCode::OK, encode_response(&resp)),
        Err(err) => {
            let (code, status) = connect_code(&err);
            json_response(status, json!({ "code": code, "message": err.to_string() }))
        }
    }
}

/// JSON form of `calculator.v1.CalculateRequest`.
///
/// Accepts both the proto field names and their lowerCamelCase JSON names.
/// Absent fields take their proto3 defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonRequest {
    #[serde(default, alias = "left_operand")]
    left_operand: JsonNumber,
    #[serde(default, alias = "right_operand")]
    right_operand: JsonNumber,
    #[serde(default)]
    operation: JsonOperation,
}

/// Enum values may be sent as numbers or as their proto names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonOperation {
    Code(i32),
    Name(String),
}

impl Default for JsonOperation {
    fn default() -> Self {
        JsonOperation::Code(0)
    }
}

/// Doubles may be sent as numbers or strings, including the proto3
/// spellings `"NaN"`, `"Infinity"` and `"-Infinity"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonNumber {
    Number(f64),
    Text(String),
}

impl Default for JsonNumber {
    fn default() -> Self {
        JsonNumber::Number(0.0)
    }
}

impl JsonNumber {
    fn value(&self, field: &str) -> Result<f64, CalcError> {
        match self {
            JsonNumber::Number(v) => Ok(*v),
            JsonNumber::Text(s) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => other.trim().parse::<f64>().map_err(|_| {
                    CalcError::InvalidInput(format!("{field}: not a number: {other:?}"))
                }),
            },
        }
    }
}

async fn decode_request(body: Body) -> Result<proto::CalculateRequest, CalcError> {
    let bytes = Limited::new(body, MAX_REQUEST_BYTES)
        .collect()
        .await
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                CalcError::InvalidInput(format!(
                    "request body exceeds {MAX_REQUEST_BYTES} bytes"
                ))
            } else {
                CalcError::InvalidInput(format!("failed to read request body: {e}"))
            }
        })?
        .to_bytes();
    let parsed: JsonRequest = serde_json::from_slice(&bytes)?;

    let operation = match parsed.operation {
        JsonOperation::Code(code) => code,
        JsonOperation::Name(name) => proto::Operation::from_str_name(&name)
            .map(|op| op as i32)
            .ok_or(CalcError::UnsupportedOperation(name))?,
    };
    Ok(proto::CalculateRequest {
        left_operand: parsed.left_operand.value("left_operand")?,
        right_operand: parsed.right_operand.value("right_operand")?,
        operation,
    })
}

fn encode_response(resp: &CalculateResponse) -> Value {
    let mut body = json!({ "result": float_json(resp.result) });
    if let Some(error) = &resp.error {
        body["error"] = Value::String(error.clone());
    }
    body
}

/// Proto3 JSON spells non-finite doubles as strings.
fn float_json(v: f64) -> Value {
    if v.is_nan() {
        Value::from("NaN")
    } else if v == f64::INFINITY {
        Value::from("Infinity")
    } else if v == f64::NEG_INFINITY {
        Value::from("-Infinity")
    } else {
        Value::from(v)
    }
}

/// Connect error code and HTTP status for an error.
pub fn connect_code(err: &CalcError) -> (&'static str, StatusCode) {
    if err.is_invalid_argument() {
        return ("invalid_argument", StatusCode::BAD_REQUEST);
    }
    match err {
        CalcError::Transport(_) => ("unavailable", StatusCode::SERVICE_UNAVAILABLE),
        _ => ("internal", StatusCode::INTERNAL_SERVER_ERROR),
    }
}

fn json_response(status: StatusCode, body: Value) -> Response<Body> {
    let bytes = Bytes::from(body.to_string());
    let mut response = Response::new(Body::new(Full::new(bytes)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
