//! Retry and backoff for fetch calls.
//!
//! `classify` decides per attempt whether to retry, accept or give up;
//! `policy` holds the ceiling and the linear backoff; `run` owns the attempt
//! loop and hands back exactly one result per call.

mod classify;
mod outcome;
mod policy;
mod run;

pub use classify::{classify_response, Classifier, BLAND_FAILURE_TEXTS};
pub use outcome::{GiveUpReason, Outcome, RetryDecision, RetryReason};
pub use policy::{RetryPolicy, DEFAULT_DELAY_STEP, DEFAULT_MAX_RETRIES};
pub use run::{fetch_retry, RetryingFetch};

pub(crate) use classify::is_falsy;
