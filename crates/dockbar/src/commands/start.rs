use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};

/// Process creation flags for a detached daemon: no console window
/// (`CREATE_NO_WINDOW`) and its own process group
/// (`CREATE_NEW_PROCESS_GROUP`), so Ctrl+C in the terminal can't reach it.
const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

pub fn execute() {
    if dockbar_windows::ipc::is_daemon_running() {
        println!("dockbar is already running.");
        return;
    }

    // Clean up a stale PID file from a previous unclean shutdown.
    if let Ok(Some(pid)) = dockbar_core::pid::read_pid_file() {
        if dockbar_windows::process::is_process_alive(pid) {
            println!("dockbar process exists (PID: {pid}) but is not responding.");
            return;
        }
        let _ = dockbar_core::pid::remove_pid_file();
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not locate the dockbar executable: {e}");
            std::process::exit(1);
        }
    };

    // Re-run ourselves with the hidden `daemon` subcommand.
    let spawned = Command::new(exe)
        .arg("daemon")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    };

    let pid = child.id();
    let _ = child.try_wait();

    print_banner(pid);
}

fn print_banner(pid: u32) {
    let d = "\x1b[90m"; // dim gray labels
    let w = "\x1b[1;97m"; // bold white values
    let r = "\x1b[0m";

    println!();
    println!("  {d}Config{r}   ~/.config/dockbar/config.toml");
    println!("  {d}Daemon{r}   Started (PID: {w}{pid}{r})");
    println!("  {d}Tip{r}      Right-click a bar to change its mode");
    println!();
}
