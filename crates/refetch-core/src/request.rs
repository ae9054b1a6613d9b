//! Request input for a fetch call.
//!
//! Mirrors the fetch-style `(input, init)` pair: `FetchInput` names the
//! resource (a bare URL or a full request object) and `FetchInit` carries
//! per-call overrides. The transport takes the input by value, so every
//! attempt of a retried call gets its own copy via `FetchInput::fresh_copy`.

use std::fmt;
use std::time::Duration;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }

    /// Parse a method name, case-insensitively.
    pub fn parse(s: &str) -> Option<Method> {
        let m = match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            _ => return None,
        };
        Some(m)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete request object. The body is owned, so a transport that
/// consumes it leaves the caller's original untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl FetchRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Take the body out of the request, leaving `None` behind.
    pub fn take_body(&mut self) -> Option<Vec<u8>> {
        self.body.take()
    }
}

/// The resource half of a fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchInput {
    Url(String),
    Request(FetchRequest),
}

impl FetchInput {
    pub fn url(&self) -> &str {
        match self {
            FetchInput::Url(u) => u,
            FetchInput::Request(r) => &r.url,
        }
    }

    /// Copy of the input for one attempt. Request objects may have their body
    /// consumed by the transport, so each attempt needs its own.
    pub fn fresh_copy(&self) -> FetchInput {
        self.clone()
    }
}

impl From<&str> for FetchInput {
    fn from(url: &str) -> Self {
        FetchInput::Url(url.to_string())
    }
}

impl From<String> for FetchInput {
    fn from(url: String) -> Self {
        FetchInput::Url(url)
    }
}

impl From<FetchRequest> for FetchInput {
    fn from(req: FetchRequest) -> Self {
        FetchInput::Request(req)
    }
}

/// Per-call overrides, applied on top of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchInit {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

/// Input and init merged into what actually goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl PreparedRequest {
    /// Merge `init` over `input`. Init wins for method and body; init headers
    /// replace request headers of the same name (case-insensitive).
    pub fn resolve(input: FetchInput, init: &FetchInit) -> Self {
        let (method, url, mut headers, body) = match input {
            FetchInput::Url(url) => (Method::Get, url, Vec::new(), None),
            FetchInput::Request(r) => (r.method, r.url, r.headers, r.body),
        };

        for (name, value) in &init.headers {
            headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        Self {
            method: init.method.unwrap_or(method),
            url,
            headers,
            body: init.body.clone().or(body),
            timeout: init.timeout,
        }
    }
}
