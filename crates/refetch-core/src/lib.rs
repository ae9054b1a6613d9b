pub mod config;
pub mod logging;

pub mod api;
pub mod online;
pub mod request;
pub mod response;
pub mod retry;
pub mod transport;

pub use online::{ConnectivityMonitor, OnlineState};
pub use request::{FetchInit, FetchInput, FetchRequest, Method};
pub use response::FetchResponse;
pub use retry::{fetch_retry, RetryPolicy, RetryingFetch};
pub use transport::{CurlTransport, Transport, TransportError};
