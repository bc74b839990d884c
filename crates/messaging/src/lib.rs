//! Cross-window messaging seam for the framepilot driver link.
//!
//! The link itself never talks to a real `postMessage` channel; it goes
//! through the [`DriverTransport`] trait. This crate provides:
//!
//! - [`DriverTransport`] — the transport contract (confirmed send,
//!   fire-and-forget post, inbound subscription).
//! - [`InProcessTransport`] — a broadcast-backed implementation used by
//!   tests and embedders that host both sides in one process.

pub mod bus;
pub mod transport;

pub use bus::InProcessTransport;
pub use transport::{DriverTransport, SendToDriverError};
