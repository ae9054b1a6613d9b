//! libcurl-backed transport.
//!
//! Each call builds a fresh easy handle and runs the transfer on the blocking
//! pool, so the async caller is never parked on socket I/O.

use async_trait::async_trait;
use std::str;
use std::time::Duration;

use super::parse::parse_head;
use super::{Transport, TransportError};
use crate::config::TransportConfig;
use crate::request::{FetchInit, FetchInput, Method, PreparedRequest};
use crate::response::FetchResponse;

/// Transport that performs one HTTP exchange per call with libcurl.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::from_config(&TransportConfig::default())
    }
}

impl CurlTransport {
    pub fn from_config(cfg: &TransportConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn fetch(
        &self,
        input: FetchInput,
        init: &FetchInit,
    ) -> Result<FetchResponse, TransportError> {
        let req = PreparedRequest::resolve(input, init);
        let connect_timeout = self.connect_timeout;
        let timeout = req.timeout.unwrap_or(self.timeout);
        let user_agent = self.user_agent.clone();

        tracing::trace!(method = %req.method, url = %req.url, "curl transfer");
        tokio::task::spawn_blocking(move || perform(req, connect_timeout, timeout, &user_agent))
            .await?
    }
}

/// Run one transfer on the current thread.
fn perform(
    req: PreparedRequest,
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: &str,
) -> Result<FetchResponse, TransportError> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url)
        .map_err(|e| TransportError::InvalidRequest(format!("{}: {}", req.url, e)))?;
    easy.follow_location(true)?;
    easy.connect_timeout(connect_timeout)?;
    easy.timeout(timeout)?;
    easy.useragent(user_agent)?;

    match req.method {
        Method::Get => easy.get(true)?,
        Method::Head => easy.nobody(true)?,
        Method::Post => easy.post(true)?,
        other => easy.custom_request(other.as_str())?,
    }
    if let Some(payload) = &req.body {
        easy.post_fields_copy(payload)?;
        if req.method != Method::Post {
            // post_fields switches the verb to POST; put the real one back.
            easy.custom_request(req.method.as_str())?;
        }
    }

    let mut list = curl::easy::List::new();
    for (k, v) in &req.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !req.headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    let status = u16::try_from(code)
        .map_err(|_| TransportError::Network(format!("invalid status code {}", code)))?;
    let head = parse_head(&header_lines);

    Ok(FetchResponse {
        status,
        status_text: head.status_text,
        headers: head.headers,
        body,
    })
}
