use dockbar_core::Command;
use dockbar_core::ipc::ResponseStatus;

pub fn execute() {
    if dockbar_windows::ipc::is_daemon_running() {
        println!("dockbar is running.");
        if let Ok(response) = dockbar_windows::ipc::send_command(&Command::Status)
            && response.status == ResponseStatus::Ok
            && let Some(bars) = response.message
        {
            for line in bars.lines() {
                println!("  {line}");
            }
        }
        return;
    }

    // Pipe isn't responding: a daemon killed without a clean shutdown
    // may have left its PID file behind.
    if let Ok(Some(pid)) = dockbar_core::pid::read_pid_file() {
        if dockbar_windows::process::is_process_alive(pid) {
            println!("dockbar process exists (PID: {pid}) but is not responding.");
        } else {
            let _ = dockbar_core::pid::remove_pid_file();
            println!("dockbar is not running (cleaned up stale PID file).");
        }
    } else {
        println!("dockbar is not running.");
    }
}
