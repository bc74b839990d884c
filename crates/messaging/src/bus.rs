//! In-process transport backed by `tokio::sync::broadcast` channels.
//!
//! [`InProcessTransport`] models the two directions of a cross-window
//! message channel with one broadcast channel each. It is designed to
//! be shared via `Arc<InProcessTransport>` between the link (controller
//! side) and whatever plays the nested driver (the peer side).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Notify};

use framepilot_core::ServiceMessage;

use crate::transport::{DriverTransport, SendToDriverError};

/// Default buffer capacity for each direction's broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// A two-directional in-process message channel.
///
/// # Peer surface
///
/// The side playing the nested driver uses [`driver_inbox`]
/// (messages the controller sent), [`emit_from_driver`] (messages
/// travelling back), and [`mark_driver_ready`] (unblocks confirmed
/// sends).
///
/// [`driver_inbox`]: InProcessTransport::driver_inbox
/// [`emit_from_driver`]: InProcessTransport::emit_from_driver
/// [`mark_driver_ready`]: InProcessTransport::mark_driver_ready
pub struct InProcessTransport {
    to_driver: broadcast::Sender<ServiceMessage>,
    from_driver: broadcast::Sender<ServiceMessage>,
    driver_ready: AtomicBool,
    ready_notify: Notify,
}

impl InProcessTransport {
    /// Create a transport with a specific per-direction channel capacity.
    ///
    /// When a buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (to_driver, _) = broadcast::channel(capacity);
        let (from_driver, _) = broadcast::channel(capacity);
        Self {
            to_driver,
            from_driver,
            driver_ready: AtomicBool::new(false),
            ready_notify: Notify::new(),
        }
    }

    /// Mark the driver side as loaded, unblocking pending and future
    /// confirmed sends.
    pub fn mark_driver_ready(&self) {
        self.driver_ready.store(true, Ordering::Release);
        self.ready_notify.notify_waiters();
    }

    /// Subscribe to messages the controller sends toward the driver.
    pub fn driver_inbox(&self) -> broadcast::Receiver<ServiceMessage> {
        self.to_driver.subscribe()
    }

    /// Emit a message from the driver side toward the controller.
    ///
    /// A message with zero controller-side subscribers is silently
    /// dropped, mirroring a `postMessage` nobody listens to.
    pub fn emit_from_driver(&self, message: ServiceMessage) {
        let _ = self.from_driver.send(message);
    }
}

impl Default for InProcessTransport {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl DriverTransport for InProcessTransport {
    async fn send_to_driver(
        &self,
        message: ServiceMessage,
        timeout: Duration,
    ) -> Result<(), SendToDriverError> {
        let _ = self.to_driver.send(message);

        // Register for the readiness notification before re-checking the
        // flag, so a `mark_driver_ready` racing this send is not lost.
        let notified = self.ready_notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.driver_ready.load(Ordering::Acquire) {
            return Ok(());
        }

        tokio::time::timeout(timeout, notified)
            .await
            .map_err(|_| {
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "driver window never confirmed it was loaded",
                );
                SendToDriverError { timeout }
            })
    }

    fn post(&self, message: ServiceMessage) {
        let _ = self.to_driver.send(message);
    }

    fn subscribe(&self) -> broadcast::Receiver<ServiceMessage> {
        self.from_driver.subscribe()
    }
}
