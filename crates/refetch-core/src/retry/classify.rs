//! Classify one attempt's outcome into a retry decision.

use serde_json::Value;

use super::outcome::{GiveUpReason, Outcome, RetryDecision, RetryReason};
use super::policy::RetryPolicy;
use crate::online::OnlineState;
use crate::response::FetchResponse;
use crate::transport::TransportError;

/// Status texts (lower-cased) that some clients report for any network
/// failure: TLS errors, resets, CORS faults. Always retried.
pub const BLAND_FAILURE_TEXTS: &[&str] = &["load failed", "failed to fetch"];

/// Decision function for the retry loop. Rules are evaluated in order and
/// the first match wins.
#[derive(Debug, Clone)]
pub struct Classifier<O> {
    online: O,
    policy: RetryPolicy,
}

impl<O: OnlineState> Classifier<O> {
    pub fn new(online: O, policy: RetryPolicy) -> Self {
        Self { online, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn online(&self) -> &O {
        &self.online
    }

    /// Decide what to do after attempt number `attempt` (0 = original try).
    ///
    /// Suspends while offline before looking at anything else.
    pub async fn classify(&self, attempt: u32, outcome: Outcome<'_>) -> RetryDecision {
        self.online.wait_for_online().await;

        if self.policy.exhausted(attempt) {
            return RetryDecision::GiveUp(GiveUpReason::TooManyRetries);
        }

        if self.online.is_unloading() {
            return RetryDecision::GiveUp(GiveUpReason::Unloading);
        }

        match outcome {
            Outcome::TransportError(e) => classify_error(e),
            Outcome::Response(r) => classify_response(r),
        }
    }
}

/// Transport errors are always retried; the bland ones are tagged as such.
fn classify_error(e: &TransportError) -> RetryDecision {
    if is_bland(&e.to_string()) {
        RetryDecision::Retry(RetryReason::BlandFailure)
    } else {
        RetryDecision::Retry(RetryReason::TransportError)
    }
}

/// Response rules, with no online/ceiling/unloading checks.
///
/// - bland status text: retry
/// - status above 404: retry
/// - 200: retry unless the body is truthy JSON
/// - anything else (1xx, 201..=399, 400..=404): accept as-is
pub fn classify_response(r: &FetchResponse) -> RetryDecision {
    if is_bland(&r.status_text) {
        return RetryDecision::Retry(RetryReason::BlandFailure);
    }

    if r.status > 404 {
        return RetryDecision::Retry(RetryReason::ServerStatus(r.status));
    }

    if r.status == 200 {
        return match r.json::<Value>() {
            Err(_) => RetryDecision::Retry(RetryReason::MalformedJson),
            Ok(v) if is_falsy(&v) => RetryDecision::Retry(RetryReason::EmptyBody),
            Ok(_) => RetryDecision::Accept,
        };
    }

    RetryDecision::Accept
}

fn is_bland(text: &str) -> bool {
    let lower = text.to_lowercase();
    BLAND_FAILURE_TEXTS.iter().any(|t| lower.contains(t))
}

/// JavaScript falsiness: objects and arrays are truthy even when empty.
pub(crate) fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
