use windows::Win32::Foundation::HWND;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForWindow, SetProcessDpiAwarenessContext,
};

use dockbar_core::dpi::scale_from_dpi;

/// Declares this process as per-monitor DPI aware (V2).
///
/// Bars are positioned in raw pixels on every monitor, so Windows must
/// not scale coordinates for us. Must be called once at process startup,
/// before creating any windows.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    // If it fails (e.g. already set via manifest), we ignore the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Scale factor of the monitor the window currently sits on.
pub fn window_scale(hwnd: HWND) -> f64 {
    // SAFETY: GetDpiForWindow only reads window state; it returns 0 for
    // an invalid handle.
    let dpi = unsafe { GetDpiForWindow(hwnd) };
    if dpi == 0 { 1.0 } else { scale_from_dpi(dpi) }
}
