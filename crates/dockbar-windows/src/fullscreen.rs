use dockbar_core::{FullScreenApp, Rect};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::WindowsAndMessaging::{
    GetDesktopWindow, GetForegroundWindow, GetShellWindow, GetSystemMetrics, GetWindowRect,
    GetWindowThreadProcessId, IsIconic, IsWindowVisible, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN,
    SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

use crate::monitor;

/// Interval between foreground checks.
pub const POLL_MS: u32 = 500;

/// Returns the foreground window if it covers a whole screen.
///
/// At most one entry: only the foreground window can be full-screen in a
/// way that matters to the bars. Windows of this process, the desktop,
/// and minimized or hidden windows never count.
pub fn detect() -> Vec<FullScreenApp> {
    // SAFETY: these calls only read window-manager state.
    unsafe {
        let fg = GetForegroundWindow();
        if fg.0.is_null() || fg == GetDesktopWindow() || fg == GetShellWindow() {
            return Vec::new();
        }

        let mut pid = 0u32;
        GetWindowThreadProcessId(fg, Some(&mut pid));
        if pid == GetCurrentProcessId() {
            return Vec::new();
        }

        if !IsWindowVisible(fg).as_bool() || IsIconic(fg).as_bool() {
            return Vec::new();
        }

        let mut rc = RECT::default();
        if GetWindowRect(fg, &mut rc).is_err() {
            return Vec::new();
        }
        let window = Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom);

        classify(fg, window).into_iter().collect()
    }
}

fn classify(hwnd: HWND, window: Rect) -> Option<FullScreenApp> {
    let virtual_screen = virtual_screen();
    let spans_virtual_screen = covers(window, virtual_screen);

    let screen = monitor::screen_for_window(hwnd)?;
    if !spans_virtual_screen && !covers(window, screen.bounds) {
        return None;
    }

    Some(FullScreenApp {
        hwnd: hwnd.0 as usize,
        device: screen.device,
        spans_virtual_screen,
    })
}

fn virtual_screen() -> Rect {
    // SAFETY: GetSystemMetrics only reads system values.
    unsafe {
        Rect::new(
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    }
}

/// Whether `window` covers `area` entirely.
fn covers(window: Rect, area: Rect) -> bool {
    area.width > 0
        && area.height > 0
        && window.x <= area.x
        && window.y <= area.y
        && window.right() >= area.right()
        && window.bottom() >= area.bottom()
}
