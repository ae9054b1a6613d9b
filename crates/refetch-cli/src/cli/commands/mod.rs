//! CLI command handlers, one file per command.

mod backoff;
mod config;
mod fetch;
mod get;
mod post;

pub use backoff::run_backoff;
pub use config::run_config;
pub use fetch::run_fetch;
pub use get::run_get;
pub use post::run_post;

use refetch_core::config::RefetchConfig;
use refetch_core::{ConnectivityMonitor, CurlTransport, RetryPolicy, RetryingFetch};
use std::sync::Arc;

pub(crate) type CliFetch = RetryingFetch<CurlTransport, Arc<ConnectivityMonitor>>;

/// Retry policy from config, with an optional ceiling override.
pub(crate) fn policy_for(cfg: &RefetchConfig, max_retries: Option<u32>) -> RetryPolicy {
    let mut policy = RetryPolicy::from_config(&cfg.retry_or_default());
    if let Some(n) = max_retries {
        policy.max_retries = n;
    }
    policy
}

/// Build the retrying transport. The first Ctrl-C flags the monitor as
/// unloading so a pending retry sequence gives up at its next classification;
/// a second one exits immediately.
pub(crate) fn retrying_fetch(cfg: &RefetchConfig, max_retries: Option<u32>) -> CliFetch {
    let monitor = Arc::new(ConnectivityMonitor::default());
    let on_signal = Arc::clone(&monitor);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        on_signal.begin_unloading();
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    RetryingFetch::with_policy(
        CurlTransport::from_config(&cfg.transport_or_default()),
        monitor,
        policy_for(cfg, max_retries),
    )
}
