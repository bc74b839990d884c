//! Liveness watchdog for in-flight commands.
//!
//! A frame that is removed or hidden while a command is executing would
//! otherwise hang the caller forever: the nested driver can no longer
//! reply. The watchdog re-checks availability on a fixed interval and,
//! once a check fails, waits one grace delay (a result message already
//! in transit must still be able to win the race) before yielding a
//! synthetic command-result status.

use std::time::Duration;

use framepilot_core::DriverStatus;

use crate::frame::FrameHandle;
use crate::guard;
use crate::timeouts::LinkTimeouts;

/// Resolve once the hosting frame is removed or hidden.
///
/// Never resolves while the frame stays available; the caller races it
/// against the real result message and drops it when that race settles,
/// which retires every timer it holds. All state lives in the future
/// itself, so concurrent invocations on one link do not interfere.
pub async fn removed_or_hidden(
    frame: &dyn FrameHandle,
    timeouts: &LinkTimeouts,
    availability_timeout: Duration,
) -> DriverStatus {
    loop {
        tokio::time::sleep(timeouts.existence_check_interval).await;

        let availability = guard::ensure_frame(
            frame,
            timeouts.visibility_check_interval,
            availability_timeout,
        )
        .await;

        if let Err(reason) = availability {
            tracing::warn!(
                %reason,
                grace_ms = timeouts.response_grace_delay.as_millis() as u64,
                "frame disappeared while a command was in flight, treating the command as finished",
            );
            tokio::time::sleep(timeouts.response_grace_delay).await;
            return DriverStatus::command_result();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use framepilot_core::{Insets, Rect};

    use super::*;

    struct RemovableFrame {
        in_document: AtomicBool,
    }

    impl FrameHandle for RemovableFrame {
        fn is_in_document(&self) -> bool {
            self.in_document.load(Ordering::Acquire)
        }

        fn is_visible(&self) -> bool {
            true
        }

        fn bounding_rect(&self) -> Rect {
            Rect::default()
        }

        fn borders_width(&self) -> Insets {
            Insets::default()
        }

        fn padding(&self) -> Insets {
            Insets::default()
        }
    }

    /// Detection happens on the first existence check after removal and
    /// the synthetic status arrives exactly one grace delay later.
    #[tokio::test(start_paused = true)]
    async fn synthesizes_a_result_one_grace_delay_after_detection() {
        let frame = Arc::new(RemovableFrame {
            in_document: AtomicBool::new(true),
        });
        let timeouts = LinkTimeouts::default();

        let remove = {
            let frame = frame.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(400)).await;
                frame.in_document.store(false, Ordering::Release);
            })
        };

        let started = tokio::time::Instant::now();
        let status =
            removed_or_hidden(frame.as_ref(), &timeouts, Duration::from_secs(10)).await;
        remove.await.expect("remove task should not panic");

        assert!(status.is_command_result);
        assert!(status.result.is_none());
        // Removed at 400ms, detected at the 1s existence check, grace
        // delay of 500ms on top.
        assert_eq!(started.elapsed(), Duration::from_millis(1500));
    }

    /// While the frame stays available the watchdog keeps polling and
    /// never resolves.
    #[tokio::test(start_paused = true)]
    async fn does_not_resolve_while_the_frame_is_available() {
        let frame = Arc::new(RemovableFrame {
            in_document: AtomicBool::new(true),
        });
        let timeouts = LinkTimeouts::default();

        let watchdog = removed_or_hidden(frame.as_ref(), &timeouts, Duration::from_secs(10));
        let patience = tokio::time::sleep(Duration::from_secs(30));

        tokio::select! {
            _ = watchdog => panic!("watchdog must not resolve for an available frame"),
            _ = patience => {}
        }
    }
}
