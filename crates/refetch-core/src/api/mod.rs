//! Freegle API client on top of a (retrying) transport.
//!
//! Two API generations are supported. v1 is the legacy API used for writes:
//! it authenticates with the persistent token, tags every call with
//! `modtools`/`app`, tunnels PUT/PATCH/DELETE through POST, and wraps results
//! in a `{ ret, status }` envelope. v2 is the fast read API: JWT auth and
//! plain JSON results.

mod envelope;
mod error;

use serde_json::{Map, Value};
use url::Url;

use crate::config::ApiConfig;
use crate::request::{FetchInit, FetchRequest, Method};
use crate::transport::Transport;

pub use error::ApiError;

/// Query parameters, in order.
pub type Params = [(String, String)];

/// Credentials attached to API calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Auth {
    /// Long-lived login token; sent as `Iznik <json>` on v1 and as
    /// `Authorization2` on v2.
    pub persistent: Option<Value>,
    /// Short-lived token for v2.
    pub jwt: Option<Value>,
}

/// Client for the v1 and v2 APIs.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    api_v1: String,
    api_v2: String,
    app: bool,
    auth: Auth,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, cfg: &ApiConfig) -> Self {
        Self {
            transport,
            api_v1: cfg.api_v1.trim_end_matches('/').to_string(),
            api_v2: cfg.api_v2.trim_end_matches('/').to_string(),
            app: cfg.app,
            auth: Auth::default(),
        }
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn set_auth(&mut self, auth: Auth) {
        self.auth = auth;
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Low-level v1 call. `method` is what goes on the wire; `override_method`
    /// is sent as `X-HTTP-Method-Override`. Failures are logged at warn level
    /// when `log_error` is set.
    pub async fn request(
        &self,
        method: Method,
        override_method: Option<Method>,
        path: &str,
        params: &Params,
        data: Option<Value>,
        log_error: bool,
    ) -> Result<Value, ApiError> {
        let mut headers = Vec::new();
        if let Some(token) = &self.auth.persistent {
            headers.push(("Authorization".to_string(), format!("Iznik {}", token)));
        }
        if let Some(m) = override_method {
            headers.push(("X-HTTP-Method-Override".to_string(), m.as_str().to_string()));
        }

        let tags = [
            ("modtools".to_string(), "false".to_string()),
            ("app".to_string(), self.app.to_string()),
        ];
        let (url, body) = if method == Method::Post {
            let mut obj = match data {
                Some(Value::Object(m)) => m,
                _ => Map::new(),
            };
            obj.insert("modtools".to_string(), Value::Bool(false));
            obj.insert("app".to_string(), Value::Bool(self.app));
            (build_url(&self.api_v1, path, params)?, Some(Value::Object(obj)))
        } else {
            let mut all: Vec<(String, String)> = params.to_vec();
            all.extend(tags);
            (build_url(&self.api_v1, path, &all)?, data)
        };

        let (status, parsed) = self.send(method, url, headers, body).await?;
        let result = envelope::check_v1(method, path, status, parsed);
        if let Err(e) = &result {
            if log_error {
                tracing::warn!(path, http_status = status, "API request failed: {}", e);
            }
        }
        result
    }

    /// Low-level v2 call.
    pub async fn request_v2(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        data: Option<Value>,
        log_error: bool,
    ) -> Result<Value, ApiError> {
        let mut headers = Vec::new();
        if let Some(jwt) = &self.auth.jwt {
            headers.push(("Authorization".to_string(), jwt.to_string()));
        }
        if let Some(token) = &self.auth.persistent {
            headers.push(("Authorization2".to_string(), token.to_string()));
        }

        let url = build_url(&self.api_v2, path, params)?;
        let (status, parsed) = self.send(method, url, headers, data).await?;
        let result = envelope::check_v2(method, path, status, parsed);
        if let Err(e) = &result {
            if log_error {
                tracing::warn!(path, http_status = status, "API request failed: {}", e);
            }
        }
        result
    }

    pub async fn get(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.request(Method::Get, None, path, params, None, true).await
    }

    pub async fn post(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.request(Method::Post, None, path, &[], Some(data), true)
            .await
    }

    pub async fn put(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.post_override(Method::Put, path, data).await
    }

    pub async fn patch(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.post_override(Method::Patch, path, data).await
    }

    pub async fn del(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.post_override(Method::Delete, path, data).await
    }

    async fn post_override(
        &self,
        method: Method,
        path: &str,
        data: Value,
    ) -> Result<Value, ApiError> {
        self.request(Method::Post, Some(method), path, &[], Some(data), true)
            .await
    }

    pub async fn get_v2(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.request_v2(Method::Get, path, params, None, true).await
    }

    pub async fn post_v2(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.request_v2(Method::Post, path, &[], Some(data), true)
            .await
    }

    /// Send one request through the transport; returns status and the body
    /// parsed as JSON (None if it is not JSON).
    async fn send(
        &self,
        method: Method,
        url: Url,
        mut headers: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<(u16, Option<Value>), ApiError> {
        let mut req = FetchRequest::new(method, url.as_str());
        if let Some(b) = body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
            req.body = Some(serde_json::to_vec(&b)?);
        }
        headers.push(("Accept".to_string(), "application/json".to_string()));
        req.headers = headers;

        let response = self
            .transport
            .fetch(req.into(), &FetchInit::default())
            .await?;
        Ok((response.status, response.json::<Value>().ok()))
    }
}

fn build_url(base: &str, path: &str, params: &Params) -> Result<Url, ApiError> {
    let mut url = Url::parse(&format!("{}{}", base, path))?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}
