//! Frame availability guard.

use std::time::Duration;

use framepilot_core::LinkError;

use crate::frame::FrameHandle;

/// Verify that the hosting frame exists and is visible.
///
/// Fails immediately with [`LinkError::CurrentFrameNotFound`] when the
/// frame element is detached from its document. Otherwise polls the
/// visibility predicate at `visibility_check_interval` until it passes,
/// or until `availability_timeout` elapses, which fails with
/// [`LinkError::CurrentFrameInvisible`]. No timer outlives the call.
pub async fn ensure_frame(
    frame: &dyn FrameHandle,
    visibility_check_interval: Duration,
    availability_timeout: Duration,
) -> Result<(), LinkError> {
    if !frame.is_in_document() {
        return Err(LinkError::CurrentFrameNotFound);
    }

    let wait_visible = async {
        loop {
            if frame.is_visible() {
                return;
            }
            tokio::time::sleep(visibility_check_interval).await;
        }
    };

    tokio::time::timeout(availability_timeout, wait_visible)
        .await
        .map_err(|_| LinkError::CurrentFrameInvisible)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use framepilot_core::{Insets, Rect};

    use super::*;

    struct FlaggedFrame {
        in_document: AtomicBool,
        visible: AtomicBool,
    }

    impl FlaggedFrame {
        fn new(in_document: bool, visible: bool) -> Arc<Self> {
            Arc::new(Self {
                in_document: AtomicBool::new(in_document),
                visible: AtomicBool::new(visible),
            })
        }
    }

    impl FrameHandle for FlaggedFrame {
        fn is_in_document(&self) -> bool {
            self.in_document.load(Ordering::Acquire)
        }

        fn is_visible(&self) -> bool {
            self.visible.load(Ordering::Acquire)
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

    const POLL: Duration = Duration::from_millis(200);

    #[tokio::test(start_paused = true)]
    async fn detached_frame_fails_without_waiting() {
        let frame = FlaggedFrame::new(false, true);
        let started = tokio::time::Instant::now();

        let result = ensure_frame(frame.as_ref(), POLL, Duration::from_secs(10)).await;

        assert_matches!(result, Err(LinkError::CurrentFrameNotFound));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn visible_frame_passes_immediately() {
        let frame = FlaggedFrame::new(true, true);
        let started = tokio::time::Instant::now();

        ensure_frame(frame.as_ref(), POLL, Duration::from_secs(10))
            .await
            .expect("visible frame should pass the guard");
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn frame_becoming_visible_passes_before_the_timeout() {
        let frame = FlaggedFrame::new(true, false);

        let unhide = {
            let frame = frame.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                frame.visible.store(true, Ordering::Release);
            })
        };

        ensure_frame(frame.as_ref(), POLL, Duration::from_secs(5))
            .await
            .expect("guard should pass once the frame becomes visible");
        unhide.await.expect("unhide task should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn permanently_hidden_frame_fails_exactly_at_the_timeout() {
        let frame = FlaggedFrame::new(true, false);
        let timeout = Duration::from_secs(2);
        let started = tokio::time::Instant::now();

        let result = ensure_frame(frame.as_ref(), POLL, timeout).await;

        assert_matches!(result, Err(LinkError::CurrentFrameInvisible));
        assert_eq!(started.elapsed(), timeout);
    }
}
