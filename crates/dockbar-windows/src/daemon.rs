use dockbar_core::WindowResult;
use dockbar_core::pid;

use crate::dpi;

#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_types.rs"]
mod daemon_types;

/// Runs the dockbar daemon.
///
/// The calling thread owns every bar window and runs the Win32 message
/// pump. A background thread listens on the IPC pipe and hands commands
/// to the pump.
pub fn run() -> WindowResult<()> {
    dpi::enable_dpi_awareness();
    pid::write_pid_file()?;
    eprintln!("dockbar daemon started.");

    let result = daemon_loop::daemon_loop();

    let _ = pid::remove_pid_file();

    result
}
