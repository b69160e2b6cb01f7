use dockbar_core::Command;
use dockbar_core::ipc::ResponseStatus;

/// Sends a command to the running daemon and prints its answer.
pub fn execute(command: Command) {
    if !dockbar_windows::ipc::is_daemon_running() {
        eprintln!("dockbar is not running.");
        std::process::exit(1);
    }

    match dockbar_windows::ipc::send_command(&command) {
        Ok(response) => {
            if response.status == ResponseStatus::Ok {
                if let Some(msg) = response.message {
                    println!("{msg}");
                }
            } else {
                eprintln!(
                    "Error: {}",
                    response.message.unwrap_or("unknown error".into()),
                );
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to send command: {e}");
            std::process::exit(1);
        }
    }
}
