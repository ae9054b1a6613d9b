//! Buffered HTTP response returned by a transport.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A complete response: status line, headers and the full body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Reason phrase from the status line (may be empty, e.g. over HTTP/2).
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize `value` as the body and set `Content-Type: application/json`.
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = serde_json::to_vec(value)?;
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(self)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, lossy for invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn json_body_parses() {
        let r = FetchResponse::new(200, "OK")
            .with_json(&json!({"ret": 0, "status": "Success"}))
            .unwrap();
        let v: Value = r.json().unwrap();
        assert_eq!(v["ret"], 0);
        assert_eq!(r.header("content-type"), Some("application/json"));
    }

    #[test]
    fn empty_body_is_not_json() {
        let r = FetchResponse::new(200, "OK");
        assert!(r.json::<Value>().is_err());
        assert_eq!(r.text(), "");
    }

    #[test]
    fn success_range() {
        assert!(FetchResponse::new(204, "No Content").is_success());
        assert!(!FetchResponse::new(301, "Moved").is_success());
        assert!(!FetchResponse::new(404, "Not Found").is_success());
    }
}
