use std::sync::mpsc;

use dockbar_core::ipc::{Command, Response};
use windows::Win32::UI::WindowsAndMessaging::WM_APP;

/// Thread message that wakes the UI thread when commands are queued.
pub(super) const WM_DAEMON_COMMAND: u32 = WM_APP + 0x10;

/// A CLI command with a callback to send the response.
pub(super) struct DaemonMsg {
    pub command: Command,
    pub reply: ResponseSender,
}

/// Sends a response back to the IPC thread for the connected client.
pub(super) type ResponseSender = mpsc::Sender<Response>;
