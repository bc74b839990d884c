//! Shared types for the framepilot driver link.
//!
//! This crate defines the wire protocol spoken between the controlling
//! driver and the driver running inside a nested frame:
//!
//! - [`ServiceMessage`] — the tagged message envelope.
//! - [`DriverStatus`] — the outcome of one command execution.
//! - [`LinkError`] — the closed error taxonomy surfaced by the link.
//! - geometry primitives ([`Point`], [`Rect`], [`Insets`]) used to
//!   compute a frame's origin point.

pub mod error;
pub mod geometry;
pub mod messages;
pub mod status;

pub use error::LinkError;
pub use geometry::{Insets, Point, Rect};
pub use messages::{
    Command, CommandExecutedMessage, ConfirmationMessage, ConfirmationRequestMessage,
    ConfirmationResult, ExecuteCommandMessage, ServiceMessage,
};
pub use status::DriverStatus;
