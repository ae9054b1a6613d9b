//! Online-state collaborator: connectivity and shutdown flags.
//!
//! The retry classifier waits on `OnlineState::wait_for_online` before every
//! decision and checks `is_unloading` to stop work nobody is waiting for.
//! `ConnectivityMonitor` is the shipped implementation; it is shared behind an
//! `Arc` by every in-flight call, and one `set_online(true)` releases all of
//! them at once.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Connectivity and unload state consulted by the retry classifier.
#[async_trait]
pub trait OnlineState: Send + Sync {
    /// Resolve once the client is online. Returns immediately if already online.
    /// There is no timeout.
    async fn wait_for_online(&self);

    /// True once the process has started shutting down.
    fn is_unloading(&self) -> bool;
}

#[async_trait]
impl<T: OnlineState + ?Sized> OnlineState for Arc<T> {
    async fn wait_for_online(&self) {
        (**self).wait_for_online().await
    }

    fn is_unloading(&self) -> bool {
        (**self).is_unloading()
    }
}

/// Process-wide connectivity state.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    online: watch::Sender<bool>,
    unloading: AtomicBool,
}

impl ConnectivityMonitor {
    pub fn new(online: bool) -> Self {
        let (online, _) = watch::channel(online);
        Self {
            online,
            unloading: AtomicBool::new(false),
        }
    }

    pub fn is_online(&self) -> bool {
        *self.online.borrow()
    }

    /// Update connectivity. Going online wakes every waiter.
    pub fn set_online(&self, online: bool) {
        let was = self.online.send_replace(online);
        if was != online {
            tracing::info!(online, "connectivity changed");
        }
    }

    /// Flag shutdown. In-flight retry sequences stop at their next classification.
    pub fn begin_unloading(&self) {
        if !self.unloading.swap(true, Ordering::SeqCst) {
            tracing::info!("unloading; pending retries will give up");
        }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl OnlineState for ConnectivityMonitor {
    async fn wait_for_online(&self) {
        let mut rx = self.online.subscribe();
        // Only errors if the sender is dropped, and we own it.
        let _ = rx.wait_for(|online| *online).await;
    }

    fn is_unloading(&self) -> bool {
        self.unloading.load(Ordering::SeqCst)
    }
}
