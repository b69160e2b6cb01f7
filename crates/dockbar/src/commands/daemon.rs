pub fn execute() {
    if let Err(e) = dockbar_windows::daemon::run() {
        eprintln!("Daemon error: {e}");
        std::process::exit(1);
    }
}
