//! API error type.

use serde_json::Value;
use thiserror::Error;

use crate::request::Method;
use crate::transport::TransportError;

/// Failure of an API call after the retry layer has settled.
#[derive(Debug, Error)]
pub enum ApiError {
    /// v1 call returned a bad HTTP status, no data, or a non-zero `ret`.
    #[error("API Error {method} {path} -> ret: {ret} status: {status}")]
    Api {
        method: Method,
        path: String,
        http_status: u16,
        ret: String,
        status: String,
        data: Option<Value>,
    },
    /// v2 call returned a bad HTTP status or no data.
    #[error("API Error {method} {path} -> status: {status}")]
    ApiV2 {
        method: Method,
        path: String,
        http_status: u16,
        status: String,
        data: Option<Value>,
    },
    /// Server reported `ret: 111`.
    #[error("Maintenance error")]
    Maintenance,
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// HTTP status of the response behind this error, if there was one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Api { http_status, .. } | ApiError::ApiV2 { http_status, .. } => {
                Some(*http_status)
            }
            _ => None,
        }
    }

    /// Parsed response body, if there was one.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiError::Api { data, .. } | ApiError::ApiV2 { data, .. } => data.as_ref(),
            _ => None,
        }
    }
}
