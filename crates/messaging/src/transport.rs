//! The transport contract between the controller and a nested driver
//! window.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use framepilot_core::ServiceMessage;

/// The driver window did not confirm it was loaded in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the driver window did not confirm it was loaded within {timeout:?}")]
pub struct SendToDriverError {
    pub timeout: Duration,
}

/// A message channel to one nested driver window.
///
/// Implementations wrap whatever mechanism actually crosses the window
/// boundary. One transport instance is bound to one window; addressing
/// is the embedder's concern.
#[async_trait]
pub trait DriverTransport: Send + Sync {
    /// Deliver a message, waiting up to `timeout` for the receiving
    /// driver to confirm it is loaded and able to handle it.
    async fn send_to_driver(
        &self,
        message: ServiceMessage,
        timeout: Duration,
    ) -> Result<(), SendToDriverError>;

    /// Deliver a message without waiting for anything. Never suspends,
    /// never fails; an undeliverable message is the transport's concern.
    fn post(&self, message: ServiceMessage);

    /// Subscribe to messages arriving from the driver window.
    ///
    /// Dropping the returned receiver detaches the subscription; there
    /// is no other deregistration step.
    fn subscribe(&self) -> broadcast::Receiver<ServiceMessage>;
}
