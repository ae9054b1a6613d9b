//! Classifier input and output types.

use crate::response::FetchResponse;
use crate::transport::TransportError;

/// What one attempt produced: a response or a transport error, never both.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Response(&'a FetchResponse),
    TransportError(&'a TransportError),
}

impl<'a> Outcome<'a> {
    pub fn from_result(result: &'a Result<FetchResponse, TransportError>) -> Self {
        match result {
            Ok(r) => Outcome::Response(r),
            Err(e) => Outcome::TransportError(e),
        }
    }
}

/// Why an attempt is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// Generic "Load failed" style failure that hides the real cause.
    BlandFailure,
    /// The transport raised an error.
    TransportError,
    /// Status above 404.
    ServerStatus(u16),
    /// 200 whose body is not valid JSON.
    MalformedJson,
    /// 200 whose JSON body is falsy.
    EmptyBody,
}

/// Why a retry sequence stops without accepting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUpReason {
    TooManyRetries,
    Unloading,
}

/// Decision for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Schedule another attempt.
    Retry(RetryReason),
    /// Hand the response to the caller.
    Accept,
    /// Stop; the caller gets whatever this attempt produced.
    GiveUp(GiveUpReason),
}

impl RetryDecision {
    pub fn should_retry(&self) -> bool {
        matches!(self, RetryDecision::Retry(_))
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, RetryDecision::Accept)
    }
}
