use dockbar_core::{Rect, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Dwm::{DWM_BB_ENABLE, DWM_BLURBEHIND, DwmEnableBlurBehindWindow};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetWindowLongW, HWND_BOTTOM, HWND_NOTOPMOST, HWND_TOPMOST, SW_HIDE,
    SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowLongW,
    SetWindowPos, ShowWindow, WS_EX_APPWINDOW, WS_EX_TOOLWINDOW,
};

/// A bar's native window, wrapping a Win32 `HWND`.
///
/// Every method is a single window-system call; the bar decides when to
/// make them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarWindow {
    hwnd: HWND,
}

impl BarWindow {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Handle value as seen by `dockbar-core`.
    pub fn raw(&self) -> usize {
        self.hwnd.0 as usize
    }

    /// Moves the window without touching z-order or activation.
    /// With `keep_size`, only the position changes.
    pub fn move_to(&self, rect: Rect, keep_size: bool) -> WindowResult<()> {
        let mut flags = SWP_NOZORDER | SWP_NOACTIVATE;
        if keep_size {
            flags |= SWP_NOSIZE;
        }

        // SAFETY: SetWindowPos with a valid HWND and no insert-after.
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                flags,
            )?;
        }
        Ok(())
    }

    /// Makes the window topmost and brings it to the top of that band.
    pub fn raise(&self) {
        // SAFETY: z-order only; position and size are untouched.
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            );
        }
    }

    /// Drops topmost and sends the window to the bottom of the z-order.
    pub fn concede(&self) {
        let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE;

        // SAFETY: z-order only. HWND_NOTOPMOST first, since a topmost
        // window can't be pushed under non-topmost ones directly.
        unsafe {
            let _ = SetWindowPos(self.hwnd, Some(HWND_NOTOPMOST), 0, 0, 0, 0, flags);
            let _ = SetWindowPos(self.hwnd, Some(HWND_BOTTOM), 0, 0, 0, 0, flags);
        }
    }

    pub fn set_visible(&self, visible: bool) {
        let cmd = if visible { SW_SHOWNOACTIVATE } else { SW_HIDE };

        // SAFETY: ShowWindow only changes visibility.
        unsafe {
            let _ = ShowWindow(self.hwnd, cmd);
        }
    }

    /// Turns the DWM blur-behind effect on or off.
    pub fn set_blur(&self, enable: bool) -> WindowResult<()> {
        let blur = DWM_BLURBEHIND {
            dwFlags: DWM_BB_ENABLE,
            fEnable: enable.into(),
            ..Default::default()
        };

        // SAFETY: `blur` outlives the call.
        unsafe { DwmEnableBlurBehindWindow(self.hwnd, &blur)? };
        Ok(())
    }

    /// Keeps the window out of Alt-Tab and the taskbar.
    pub fn hide_from_tasks(&self) {
        // SAFETY: reads and rewrites the window's extended style.
        unsafe {
            let ex_style = GetWindowLongW(self.hwnd, GWL_EXSTYLE);
            let tool = (ex_style | WS_EX_TOOLWINDOW.0 as i32) & !(WS_EX_APPWINDOW.0 as i32);
            SetWindowLongW(self.hwnd, GWL_EXSTYLE, tool);
        }
    }
}
