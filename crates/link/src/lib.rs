//! Child frame driver link.
//!
//! A [`ChildFrameLink`] lets a controlling driver execute one command at
//! a time inside a nested frame's driver and learn when it finished,
//! even though the two sides only exchange asynchronous messages and
//! the frame may be hidden or removed at any moment.
//!
//! The moving parts:
//!
//! - [`guard`] — availability check (frame attached and visible) before
//!   a command may be dispatched.
//! - [`watchdog`] — periodic liveness re-check while a command is in
//!   flight; synthesizes a completion status when the frame disappears.
//! - [`ChildFrameLink::execute_command`] — guard, dispatch, then race
//!   the real result message against the watchdog.
//! - [`ChildFrameLink::send_confirmation_message`] — identity reply for
//!   the discovery handshake, independent of command state.

pub mod frame;
pub mod guard;
pub mod link;
pub mod timeouts;
pub mod watchdog;

pub use frame::{left_top_point, FrameHandle};
pub use link::ChildFrameLink;
pub use timeouts::LinkTimeouts;
