use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_TERMINATE, TerminateProcess,
};

/// Checks whether a process with the given PID is still alive.
///
/// Used to detect stale PID files left behind when the daemon is killed
/// without a clean shutdown.
pub fn is_process_alive(pid: u32) -> bool {
    // SAFETY: OpenProcess attempts to open an existing process with the
    // least-privilege access right that still confirms it exists.
    let result = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) };

    match result {
        Ok(handle) => {
            // SAFETY: We only opened the handle to check existence.
            unsafe {
                let _ = CloseHandle(handle);
            }
            true
        }
        Err(_) => false,
    }
}

/// Forcibly terminates a process. Returns whether it was killed.
///
/// Last resort for `dockbar stop` when the daemon no longer answers on
/// its pipe.
pub fn kill_process(pid: u32) -> bool {
    // SAFETY: OpenProcess with PROCESS_TERMINATE; the handle is closed
    // below on every path.
    let Ok(handle) = (unsafe { OpenProcess(PROCESS_TERMINATE, false, pid) }) else {
        return false;
    };

    // SAFETY: handle was opened with PROCESS_TERMINATE above.
    let killed = unsafe { TerminateProcess(handle, 1) }.is_ok();

    // SAFETY: we own the handle.
    unsafe {
        let _ = CloseHandle(handle);
    }

    killed
}
