//! Transport layer: one HTTP exchange per call, no retries.
//!
//! `Transport` is the seam the retry wrapper sits on. `CurlTransport` is the
//! real implementation (libcurl easy handle); tests plug in scripted ones.

mod easy;
mod error;
mod parse;

use async_trait::async_trait;
use std::sync::Arc;

use crate::request::{FetchInit, FetchInput};
use crate::response::FetchResponse;

pub use easy::CurlTransport;
pub use error::TransportError;

/// A fetch-style call: `(input, init)` in, one response or one error out.
///
/// The input is taken by value; implementations may consume the request body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(
        &self,
        input: FetchInput,
        init: &FetchInit,
    ) -> Result<FetchResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch(
        &self,
        input: FetchInput,
        init: &FetchInit,
    ) -> Result<FetchResponse, TransportError> {
        (**self).fetch(input, init).await
    }
}
