//! Driver status — the outcome of one command execution.

use serde::{Deserialize, Serialize};

/// The result of executing a single command inside a nested frame.
///
/// A status either relays a genuine payload from the nested driver, or
/// is a synthetic marker produced by the link itself when the hosting
/// frame disappeared mid-command. Field names are camelCase on the
/// wire, matching the driver protocol.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStatus {
    /// Marks a status that finishes a command. The watchdog's synthetic
    /// status sets only this flag.
    pub is_command_result: bool,

    /// Opaque result payload relayed from the nested driver.
    pub result: Option<serde_json::Value>,

    /// Error raised while the nested driver executed the command.
    pub execution_error: Option<String>,

    /// Error raised by the page itself during execution.
    pub page_error: Option<String>,
}

impl DriverStatus {
    /// An empty status with no flags set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A status that marks the current command as finished.
    pub fn command_result() -> Self {
        Self {
            is_command_result: true,
            ..Self::default()
        }
    }

    /// Attach a result payload.
    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Attach an execution error message.
    pub fn with_execution_error(mut self, error: impl Into<String>) -> Self {
        self.execution_error = Some(error.into());
        self
    }

    /// Attach a page error message.
    pub fn with_page_error(mut self, error: impl Into<String>) -> Self {
        self.page_error = Some(error.into());
        self
    }
}
