use serde::{Deserialize, Serialize};

use crate::BarMode;

/// The named pipe path used for IPC between CLI and daemon.
pub const PIPE_NAME: &str = r"\\.\pipe\dockbar";

/// A command sent from the CLI to the daemon.
///
/// These are serialized as JSON and sent over the named pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    /// Request the daemon to stop.
    Stop,
    /// Request the daemon's current status.
    Status,
    /// Reveal an auto-hidden bar for a while. `None` uses the configured
    /// peek duration.
    Peek { ms: Option<u64> },
    /// Switch between docked, auto-hide, and floating.
    SetMode { mode: BarMode },
    /// Turn blur-behind on or off.
    SetBlur { enabled: bool },
}

/// A response sent from the daemon back to the CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status of a daemon response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl Response {
    /// Creates a successful response with no message.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: Some(message.into()),
        }
    }

    /// Creates a failed response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_tagged_json() {
        // Arrange
        let cmd = Command::SetMode {
            mode: BarMode::AutoHide,
        };

        // Act
        let json = serde_json::to_string(&cmd).unwrap();

        // Assert
        assert_eq!(json, r#"{"command":"SetMode","mode":"autohide"}"#);
    }

    #[test]
    fn peek_without_duration_parses() {
        let cmd: Command = serde_json::from_str(r#"{"command":"Peek","ms":null}"#).unwrap();

        assert_eq!(cmd, Command::Peek { ms: None });
    }

    #[test]
    fn ok_response_omits_message() {
        let json = serde_json::to_string(&Response::ok()).unwrap();

        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn error_response_round_trips_message() {
        let json = serde_json::to_string(&Response::error("no bar")).unwrap();
        let parsed: Response = serde_json::from_str(&json).unwrap();

        assert!(!parsed.is_ok());
        assert_eq!(parsed.message.as_deref(), Some("no bar"));
    }
}
