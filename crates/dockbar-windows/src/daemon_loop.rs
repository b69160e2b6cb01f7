use std::sync::mpsc;
use std::thread;

use dockbar_core::ipc::Command;
use dockbar_core::{WindowResult, config, log_info};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, KillTimer, MSG, SetTimer, TranslateMessage, WM_TIMER,
};

use crate::fullscreen;
use crate::host::BarHost;

use super::daemon_ipc;
use super::daemon_types::{DaemonMsg, WM_DAEMON_COMMAND};

/// How the message pump ended.
enum Exit {
    /// A `stop` command arrived over IPC.
    Stopped,
    /// `WM_QUIT`, posted by the bar's Exit menu item.
    Quit,
}

/// The inner daemon loop, separated so cleanup always runs in `run()`.
pub(super) fn daemon_loop() -> WindowResult<()> {
    let config = config::load();
    dockbar_core::log::init(&config.logging);

    log_info!("Daemon started (PID: {})", std::process::id());
    log_info!(
        "Config: edge={}, mode={}, thickness={}, log_level={}",
        config.bar.edge.as_str(),
        config.bar.mode,
        config.bar.thickness,
        config.logging.level
    );

    let host = BarHost::create(&config)?;

    // SAFETY: reads the id of the calling thread.
    let ui_thread = unsafe { GetCurrentThreadId() };
    let (tx, rx) = mpsc::channel::<DaemonMsg>();
    let ipc_thread = thread::spawn(move || daemon_ipc::ipc_loop(tx, ui_thread));

    // SAFETY: a thread timer; its WM_TIMER arrives with a null hwnd.
    let poll_timer = unsafe { SetTimer(None, 0, fullscreen::POLL_MS, None) };

    let exit = run_message_pump(&host, &rx, poll_timer);

    // SAFETY: kills the thread timer created above.
    unsafe {
        let _ = KillTimer(None, poll_timer);
    }
    host.close_all();
    log_info!("Daemon stopped");

    // After WM_QUIT the listener is still blocked waiting for a client;
    // it ends with the process.
    if matches!(exit, Exit::Stopped) {
        let _ = ipc_thread.join();
    }

    Ok(())
}

/// The Win32 message pump. Handles queued commands and the full-screen
/// poll timer, dispatches everything else to the bar windows.
fn run_message_pump(host: &BarHost, rx: &mpsc::Receiver<DaemonMsg>, poll_timer: usize) -> Exit {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if msg.hwnd.is_invalid() {
            if msg.message == WM_DAEMON_COMMAND {
                if drain_commands(host, rx) {
                    return Exit::Stopped;
                }
                continue;
            }
            if msg.message == WM_TIMER && msg.wParam.0 == poll_timer {
                host.poll_full_screen();
                continue;
            }
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    Exit::Quit
}

/// Answers every queued command. Returns true once `stop` was answered.
fn drain_commands(host: &BarHost, rx: &mpsc::Receiver<DaemonMsg>) -> bool {
    while let Ok(DaemonMsg { command, reply }) = rx.try_recv() {
        let response = host.handle_command(&command);
        let _ = reply.send(response);
        if matches!(command, Command::Stop) {
            return true;
        }
    }
    false
}
