//! Retry loop: run the transport until the classifier accepts or gives up.

use async_trait::async_trait;

use super::classify::Classifier;
use super::outcome::{Outcome, RetryDecision};
use super::policy::RetryPolicy;
use crate::online::OnlineState;
use crate::request::{FetchInit, FetchInput};
use crate::response::FetchResponse;
use crate::transport::{Transport, TransportError};

/// Wrap `transport` so that every call retries per the default policy.
pub fn fetch_retry<T: Transport, O: OnlineState>(transport: T, online: O) -> RetryingFetch<T, O> {
    RetryingFetch::new(transport, online)
}

/// A transport wrapper with the same call signature as the transport it wraps.
///
/// Attempts within one call are strictly sequential. Separate calls share
/// nothing but the online state.
#[derive(Debug, Clone)]
pub struct RetryingFetch<T, O> {
    transport: T,
    classifier: Classifier<O>,
}

impl<T: Transport, O: OnlineState> RetryingFetch<T, O> {
    pub fn new(transport: T, online: O) -> Self {
        Self::with_policy(transport, online, RetryPolicy::default())
    }

    pub fn with_policy(transport: T, online: O, policy: RetryPolicy) -> Self {
        Self {
            transport,
            classifier: Classifier::new(online, policy),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        self.classifier.policy()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one call to completion.
    ///
    /// Returns the accepted response, or on give-up whatever the last attempt
    /// produced: the response if there was one, otherwise its error.
    pub async fn execute(
        &self,
        input: FetchInput,
        init: &FetchInit,
    ) -> Result<FetchResponse, TransportError> {
        let url = input.url().to_string();
        let mut attempt: u32 = 0;

        loop {
            let result = self.transport.fetch(input.fresh_copy(), init).await;
            match &result {
                Ok(r) => tracing::debug!(attempt, status = r.status, %url, "fetch attempt returned"),
                Err(e) => tracing::debug!(attempt, error = %e, %url, "fetch attempt failed"),
            }

            let decision = self
                .classifier
                .classify(attempt, Outcome::from_result(&result))
                .await;

            match decision {
                RetryDecision::Accept => return result,
                RetryDecision::GiveUp(reason) => {
                    tracing::info!(attempt, ?reason, %url, "giving up on fetch");
                    return result;
                }
                RetryDecision::Retry(reason) => {
                    attempt += 1;
                    let delay = self.policy().delay_for(attempt);
                    tracing::debug!(attempt, ?reason, delay_ms = delay.as_millis() as u64, %url, "retrying fetch");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl<T: Transport, O: OnlineState> Transport for RetryingFetch<T, O> {
    async fn fetch(
        &self,
        input: FetchInput,
        init: &FetchInit,
    ) -> Result<FetchResponse, TransportError> {
        self.execute(input, init).await
    }
}
