use std::sync::mpsc;

use dockbar_core::ipc::Command;
use dockbar_core::{log_debug, log_warn};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::PostThreadMessageW;

use crate::ipc::PipeServer;

use super::daemon_types::{DaemonMsg, ResponseSender, WM_DAEMON_COMMAND};

/// Accepts IPC connections in a loop and forwards commands to the UI
/// thread. Runs on a dedicated thread.
///
/// The UI thread blocks in `GetMessageW`, so each queued command is
/// followed by a thread message that wakes it.
pub(super) fn ipc_loop(tx: mpsc::Sender<DaemonMsg>, ui_thread: u32) {
    loop {
        let server = match PipeServer::create() {
            Ok(s) => s,
            Err(e) => {
                log_warn!("Failed to create pipe: {e}");
                return;
            }
        };

        let command = match server.accept_command() {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                log_warn!("Error reading command: {e}");
                continue;
            }
        };
        log_debug!("IPC command: {command:?}");

        let (reply_tx, reply_rx): (ResponseSender, _) = mpsc::channel();
        let is_stop = matches!(command, Command::Stop);

        let msg = DaemonMsg {
            command,
            reply: reply_tx,
        };
        if tx.send(msg).is_err() {
            return;
        }

        // SAFETY: posting a parameterless message to a thread of this
        // process that runs a message queue.
        let woke = unsafe {
            PostThreadMessageW(ui_thread, WM_DAEMON_COMMAND, WPARAM(0), LPARAM(0))
        };
        if let Err(e) = woke {
            log_warn!("Failed to wake the UI thread: {e}");
            return;
        }

        if let Ok(response) = reply_rx.recv() {
            let _ = server.send_response(&response);
        }

        if is_stop {
            return;
        }
    }
}
