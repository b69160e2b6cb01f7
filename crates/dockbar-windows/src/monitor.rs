use std::mem;

use dockbar_core::{DisplayTopology, Rect, Screen};
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITOR_DEFAULTTONEAREST,
    MONITOR_DEFAULTTOPRIMARY, MONITORINFO, MONITORINFOEXW, MonitorFromWindow,
};
use windows::core::BOOL;

/// `MONITORINFO::dwFlags` bit set on the primary monitor.
const MONITORINFOF_PRIMARY: u32 = 0x1;

/// Live display topology read from the window system on every call.
#[derive(Debug, Default)]
pub struct Win32Displays;

impl DisplayTopology for Win32Displays {
    fn primary_screen(&self) -> Option<Screen> {
        // SAFETY: a null HWND with MONITOR_DEFAULTTOPRIMARY returns the
        // primary monitor.
        let monitor = unsafe { MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY) };
        screen_for_monitor(monitor)
    }

    fn screens(&self) -> Vec<Screen> {
        let mut screens: Vec<Screen> = enumerate_monitors()
            .into_iter()
            .filter_map(screen_for_monitor)
            .collect();
        screens.sort_by_key(|s| !s.primary);
        screens
    }
}

/// The screen a window currently sits on.
pub fn screen_for_window(hwnd: HWND) -> Option<Screen> {
    // SAFETY: MonitorFromWindow never fails with MONITOR_DEFAULTTONEAREST.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    screen_for_monitor(monitor)
}

fn enumerate_monitors() -> Vec<HMONITOR> {
    let mut monitors: Vec<HMONITOR> = Vec::new();

    // SAFETY: the callback only runs during this call and pushes into
    // the Vec passed through LPARAM.
    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(collect_monitor),
            LPARAM(&mut monitors as *mut Vec<HMONITOR> as isize),
        );
    }

    monitors
}

unsafe extern "system" fn collect_monitor(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    data: LPARAM,
) -> BOOL {
    // SAFETY: `data` is the &mut Vec handed to EnumDisplayMonitors.
    let monitors = unsafe { &mut *(data.0 as *mut Vec<HMONITOR>) };
    monitors.push(monitor);
    true.into()
}

fn screen_for_monitor(monitor: HMONITOR) -> Option<Screen> {
    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: MONITORINFOEXW starts with MONITORINFO and cbSize tells
    // GetMonitorInfoW which layout to fill.
    let ok = unsafe {
        GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO)
    };
    if !ok.as_bool() {
        return None;
    }

    let device_len = info
        .szDevice
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(info.szDevice.len());
    let device = String::from_utf16_lossy(&info.szDevice[..device_len]);

    let rc = info.monitorInfo.rcMonitor;
    Some(Screen::new(
        device,
        Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom),
        info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
    ))
}
