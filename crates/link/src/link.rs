//! The child frame driver link.

use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, Either};
use tokio::sync::broadcast;

use framepilot_core::{
    Command, ConfirmationMessage, ConfirmationResult, DriverStatus, ExecuteCommandMessage,
    LinkError, Point, ServiceMessage,
};
use framepilot_messaging::DriverTransport;

use crate::frame::{left_top_point, FrameHandle};
use crate::guard;
use crate::timeouts::LinkTimeouts;
use crate::watchdog;

/// A controller-side handle to the driver running inside one nested
/// frame.
///
/// The link owns no command semantics: it checks the frame is available,
/// relays the command over the transport, and reconciles the two racing
/// completion signals (the driver's `command-executed` message and the
/// watchdog's disappearance detection) into one [`DriverStatus`].
///
/// All per-command state lives in the `execute_command` invocation, so
/// a link shared behind `Arc` tolerates overlapping invocations; note
/// that the wire protocol itself carries no correlation id, so every
/// in-flight invocation observes the first result message that arrives.
pub struct ChildFrameLink {
    frame: Arc<dyn FrameHandle>,
    transport: Arc<dyn DriverTransport>,
    driver_id: String,
    dispatch_event_url: String,
    availability_timeout: Duration,
    timeouts: LinkTimeouts,
}

impl ChildFrameLink {
    /// Create a link to the driver hosted by `frame`, reachable through
    /// `transport`.
    ///
    /// The availability timeout starts at zero; the controlling driver
    /// sets the real value via
    /// [`set_availability_timeout`](Self::set_availability_timeout)
    /// once the run's timeouts are known.
    pub fn new(
        frame: Arc<dyn FrameHandle>,
        transport: Arc<dyn DriverTransport>,
        driver_id: impl Into<String>,
        dispatch_event_url: impl Into<String>,
    ) -> Self {
        Self {
            frame,
            transport,
            driver_id: driver_id.into(),
            dispatch_event_url: dispatch_event_url.into(),
            availability_timeout: Duration::ZERO,
            timeouts: LinkTimeouts::default(),
        }
    }

    /// Override the guard/watchdog timing knobs.
    pub fn with_timeouts(mut self, timeouts: LinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set how long availability checks and confirmed sends may take.
    pub fn set_availability_timeout(&mut self, timeout: Duration) {
        self.availability_timeout = timeout;
    }

    /// Stable identifier of this link.
    pub fn driver_id(&self) -> &str {
        &self.driver_id
    }

    /// Execute one command inside the nested frame and wait for its
    /// status.
    ///
    /// Steps:
    ///
    /// 1. Re-check availability — the frame may have been hidden or
    ///    removed since the previous command.
    /// 2. When `with_origin_point` is set, compute the frame's origin
    ///    point and add `inherited_offset` component-wise (nested frame
    ///    chains accumulate offsets).
    /// 3. Dispatch the command over the transport (confirmed send,
    ///    bounded by the availability timeout) while racing the
    ///    driver's result message against the liveness watchdog.
    ///
    /// Resolves with the race's status once both the send and the race
    /// settle. Fails with [`LinkError::CurrentFrameNotLoaded`] when the
    /// transport cannot confirm the nested driver in time; guard
    /// failures propagate unchanged. A frame that disappears after
    /// dispatch is not an error: the watchdog turns it into a synthetic
    /// command-result status.
    pub async fn execute_command(
        &self,
        command: Command,
        test_speed: f64,
        with_origin_point: bool,
        inherited_offset: Option<Point>,
    ) -> Result<DriverStatus, LinkError> {
        guard::ensure_frame(
            self.frame.as_ref(),
            self.timeouts.visibility_check_interval,
            self.availability_timeout,
        )
        .await?;

        let point = with_origin_point.then(|| {
            let origin = left_top_point(self.frame.as_ref());
            match inherited_offset {
                Some(offset) => origin + offset,
                None => origin,
            }
        });

        let message = ServiceMessage::ExecuteCommand(ExecuteCommandMessage {
            command,
            test_speed,
            left_top_point: point,
        });

        tracing::debug!(
            driver_id = %self.driver_id,
            with_origin_point,
            "dispatching command to the nested driver",
        );

        // Subscribe before dispatching so a fast reply cannot slip past
        // the race.
        let subscription = self.transport.subscribe();

        let send = async {
            self.transport
                .send_to_driver(message, self.availability_timeout)
                .await
                .map_err(|_| LinkError::CurrentFrameNotLoaded)
        };
        let race = async { Ok(self.wait_for_command_result(subscription).await) };

        let ((), status) = tokio::try_join!(send, race)?;
        Ok(status)
    }

    /// Race the driver's `command-executed` message against the
    /// liveness watchdog; first settled branch decides the status.
    ///
    /// Dropping the loser (and the subscription receiver) on return is
    /// the cleanup: it retires the loser's timers and detaches the
    /// message handler before the caller resumes.
    async fn wait_for_command_result(
        &self,
        mut messages: broadcast::Receiver<ServiceMessage>,
    ) -> DriverStatus {
        let result_message = async {
            loop {
                match messages.recv().await {
                    Ok(ServiceMessage::CommandExecuted(executed)) => {
                        return executed.driver_status;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            driver_id = %self.driver_id,
                            skipped,
                            "inbound message subscription lagged",
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // Transport gone; let the watchdog settle the race.
                        return future::pending().await;
                    }
                }
            }
        };

        let removed_or_hidden = watchdog::removed_or_hidden(
            self.frame.as_ref(),
            &self.timeouts,
            self.availability_timeout,
        );

        match future::select(pin!(result_message), pin!(removed_or_hidden)).await {
            Either::Left((status, _)) => {
                tracing::debug!(
                    driver_id = %self.driver_id,
                    "command result relayed from the nested driver",
                );
                status
            }
            Either::Right((status, _)) => {
                tracing::debug!(
                    driver_id = %self.driver_id,
                    "command treated as finished after frame disappearance",
                );
                status
            }
        }
    }

    /// Reply to a discovery ping with this link's identity.
    ///
    /// Never suspends and has no failure mode; it can interleave ahead
    /// of or behind an in-flight command without affecting it.
    pub fn send_confirmation_message(&self, request_msg_id: &str) {
        self.transport
            .post(ServiceMessage::Confirmation(ConfirmationMessage {
                request_msg_id: request_msg_id.to_owned(),
                result: ConfirmationResult {
                    id: self.driver_id.clone(),
                    dispatch_event_url: self.dispatch_event_url.clone(),
                },
            }));
    }
}
