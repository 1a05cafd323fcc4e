//! CORS policy for browser clients.

use std::time::Duration;

use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, ExposeHeaders};
use tracing::warn;

use super::config::CorsConfig;
use crate::{CalcError, Result};

/// Response headers gRPC-Web clients need to read trailers-in-body.
const GRPC_WEB_EXPOSED: [&str; 3] = ["grpc-status", "grpc-message", "grpc-status-details-bin"];

/// Build a CORS layer from config.
///
/// `"*"` in any list means "anything". With credentials enabled a wildcard
/// origin is rejected, and wildcard methods/headers are mirrored from the
/// preflight request instead, since browsers refuse a literal `*` on
/// credentialed requests.
pub fn build_cors_layer(cfg: &CorsConfig) -> Result<CorsLayer> {
    let has_wildcard_origin = cfg.allowed_origins.iter().any(|o| o == "*");

    if has_wildcard_origin && cfg.allow_credentials {
        return Err(CalcError::Configuration(
            "CORS allowed_origins = [\"*\"] cannot be combined with allow_credentials = true"
                .to_string(),
        ));
    }

    let origin = if has_wildcard_origin {
        warn!("CORS allows any origin; list explicit origins for production deployments");
        AllowOrigin::any()
    } else {
        let origins = cfg
            .allowed_origins
            .iter()
            .map(|s| {
                HeaderValue::from_str(s).map_err(|e| {
                    CalcError::Configuration(format!("invalid CORS origin {s:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    let methods = if cfg.allowed_methods.iter().any(|m| m == "*") {
        if cfg.allow_credentials {
            AllowMethods::mirror_request()
        } else {
            AllowMethods::any()
        }
    } else {
        let methods = cfg
            .allowed_methods
            .iter()
            .map(|s| {
                s.parse::<Method>().map_err(|e| {
                    CalcError::Configuration(format!("invalid CORS method {s:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowMethods::list(methods)
    };

    let headers = if cfg.allowed_headers.iter().any(|h| h == "*") {
        if cfg.allow_credentials {
            AllowHeaders::mirror_request()
        } else {
            AllowHeaders::any()
        }
    } else {
        let headers = cfg
            .allowed_headers
            .iter()
            .map(|s| {
                s.parse::<HeaderName>().map_err(|e| {
                    CalcError::Configuration(format!("invalid CORS header {s:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowHeaders::list(headers)
    };

    let mut layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .expose_headers(ExposeHeaders::list(
            GRPC_WEB_EXPOSED.map(HeaderName::from_static),
        ));

    if cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    if cfg.max_age_secs > 0 {
        layer = layer.max_age(Duration::from_secs(cfg.max_age_secs));
    }

    Ok(layer)
}
