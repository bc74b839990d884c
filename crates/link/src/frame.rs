//! The hosting frame element, as seen by the link.

use framepilot_core::{Insets, Point, Rect};

/// DOM predicates and geometry for the frame element hosting a nested
/// driver.
///
/// The embedder derives this handle from the nested window (the link
/// never resolves windows to elements itself) and keeps it accurate:
/// every call reflects the element's current state.
pub trait FrameHandle: Send + Sync {
    /// Is the frame element still attached to its document?
    fn is_in_document(&self) -> bool;

    /// Does the frame element pass the visibility predicate?
    fn is_visible(&self) -> bool;

    /// Bounding rectangle of the frame element.
    fn bounding_rect(&self) -> Rect;

    /// Border widths of the frame element.
    fn borders_width(&self) -> Insets;

    /// Padding of the frame element.
    fn padding(&self) -> Insets;
}

/// Origin of the frame's inner coordinate space in the controller
/// document: bounding rect corner plus border and padding insets.
pub fn left_top_point(frame: &dyn FrameHandle) -> Point {
    let rect = frame.bounding_rect();
    let borders = frame.borders_width();
    let padding = frame.padding();

    Point::new(
        rect.left + borders.left + padding.left,
        rect.top + borders.top + padding.top,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFrame;

    impl FrameHandle for FixedFrame {
        fn is_in_document(&self) -> bool {
            true
        }

        fn is_visible(&self) -> bool {
            true
        }

        fn bounding_rect(&self) -> Rect {
            Rect {
                left: 4.0,
                top: 1.0,
                width: 640.0,
                height: 480.0,
            }
        }

        fn borders_width(&self) -> Insets {
            Insets {
                top: 1.0,
                right: 1.0,
                bottom: 1.0,
                left: 3.5,
            }
        }

        fn padding(&self) -> Insets {
            Insets {
                top: 1.0,
                right: 0.0,
                bottom: 0.0,
                left: 2.5,
            }
        }
    }

    #[test]
    fn origin_sums_rect_border_and_padding() {
        let point = left_top_point(&FixedFrame);
        assert_eq!(point, Point::new(10.0, 3.0));
    }
}
