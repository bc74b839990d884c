//! Service messages exchanged between the controller and the nested
//! frame's driver.
//!
//! Messages are JSON objects with the shape `{"type": "<kind>", ...}`.
//! This module models them as an internally-tagged [`ServiceMessage`]
//! enum; field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::status::DriverStatus;

/// An opaque command instruction.
///
/// The link relays commands verbatim; it never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Command(serde_json::Value);

impl Command {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// All service message kinds, tagged by the `"type"` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServiceMessage {
    /// Controller → nested driver: execute a command.
    #[serde(rename = "execute-command")]
    ExecuteCommand(ExecuteCommandMessage),

    /// Nested driver → controller: a command finished with a status.
    #[serde(rename = "command-executed")]
    CommandExecuted(CommandExecutedMessage),

    /// Prober → controller: which link is live in this frame?
    #[serde(rename = "confirmation-request")]
    ConfirmationRequest(ConfirmationRequestMessage),

    /// Controller → nested driver: identity reply to a confirmation
    /// request.
    #[serde(rename = "confirmation")]
    Confirmation(ConfirmationMessage),
}

/// Payload of an `execute-command` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCommandMessage {
    pub command: Command,

    /// Execution speed scalar in `(0, 1]`.
    pub test_speed: f64,

    /// Origin of the hosting frame in the top document's coordinates,
    /// present only when origin tracking is enabled.
    pub left_top_point: Option<Point>,
}

/// Payload of a `command-executed` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandExecutedMessage {
    pub driver_status: DriverStatus,
}

/// Payload of a `confirmation-request` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequestMessage {
    pub request_msg_id: String,
}

/// Payload of a `confirmation` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationMessage {
    pub request_msg_id: String,
    pub result: ConfirmationResult,
}

/// Identity carried by a confirmation reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResult {
    /// Stable identifier of the link.
    pub id: String,

    /// URL the nested driver uses to dispatch native events.
    pub dispatch_event_url: String,
}
