use dockbar_core::ipc::ResponseStatus;

pub fn execute() {
    // Graceful shutdown releases every reserved edge.
    if dockbar_windows::ipc::is_daemon_running() {
        let command = dockbar_core::Command::Stop;
        match dockbar_windows::ipc::send_command(&command) {
            Ok(response) if response.status == ResponseStatus::Ok => {
                println!("dockbar stopped. {}", response.message.unwrap_or_default());
                let _ = dockbar_core::pid::remove_pid_file();
                return;
            }
            Ok(response) => {
                eprintln!(
                    "Error: {}",
                    response.message.unwrap_or("unknown error".into())
                );
                return;
            }
            Err(e) => eprintln!("IPC failed: {e}"),
        }
    }

    // The pipe is gone but the process may still be alive.
    match dockbar_core::pid::read_pid_file() {
        Ok(Some(pid)) if dockbar_windows::process::is_process_alive(pid) => {
            if dockbar_windows::process::kill_process(pid) {
                let _ = dockbar_core::pid::remove_pid_file();
                println!("dockbar stopped (killed PID {pid}).");
                println!("Run 'dockbar start' to release any edge space it still holds.");
            } else {
                eprintln!("Failed to kill process {pid}.");
                std::process::exit(1);
            }
        }
        _ => {
            println!("dockbar is not running.");
        }
    }
}
