//! The settings menu shown on right-click.

use dockbar_core::{BarMode, log_warn};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, HMENU, MF_CHECKED, MF_SEPARATOR, MF_STRING,
    MF_UNCHECKED, PostQuitMessage, SetForegroundWindow, TPM_RETURNCMD, TPM_RIGHTBUTTON,
    TrackPopupMenuEx,
};
use windows::core::{PCWSTR, w};

use super::{Slot, apply};

const CMD_DOCKED: usize = 1;
const CMD_AUTO_HIDE: usize = 2;
const CMD_FLOATING: usize = 3;
const CMD_BLUR: usize = 4;
const CMD_EXIT: usize = 5;

/// What the user picked from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MenuChoice {
    Mode(BarMode),
    Blur(bool),
    Exit,
}

/// Shows the menu at `at` (screen coordinates) and waits for a pick.
pub(super) fn show(slot: &Slot, at: POINT) -> Option<MenuChoice> {
    let (mode, blur) = {
        let bar = slot.bar.borrow();
        (bar.mode(), bar.blur_enabled())
    };

    // SAFETY: the menu is created, tracked and destroyed here; the owner
    // window is our own.
    unsafe {
        let menu = match CreatePopupMenu() {
            Ok(menu) => menu,
            Err(e) => {
                log_warn!("Failed to create context menu: {e}");
                return None;
            }
        };

        if let Err(e) = fill(menu, mode, blur) {
            log_warn!("Failed to build context menu: {e}");
            let _ = DestroyMenu(menu);
            return None;
        }

        let hwnd = slot.window.hwnd();
        let _ = SetForegroundWindow(hwnd);
        let picked = TrackPopupMenuEx(
            menu,
            (TPM_RETURNCMD | TPM_RIGHTBUTTON).0,
            at.x,
            at.y,
            hwnd,
            None,
        );
        let _ = DestroyMenu(menu);

        match picked.0 as usize {
            CMD_DOCKED => Some(MenuChoice::Mode(BarMode::Docked)),
            CMD_AUTO_HIDE => Some(MenuChoice::Mode(BarMode::AutoHide)),
            CMD_FLOATING => Some(MenuChoice::Mode(BarMode::Floating)),
            CMD_BLUR => Some(MenuChoice::Blur(!blur)),
            CMD_EXIT => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

unsafe fn fill(menu: HMENU, mode: BarMode, blur: bool) -> windows::core::Result<()> {
    let check = |on: bool| if on { MF_CHECKED } else { MF_UNCHECKED };

    unsafe {
        AppendMenuW(
            menu,
            MF_STRING | check(mode == BarMode::Docked),
            CMD_DOCKED,
            w!("Docked"),
        )?;
        AppendMenuW(
            menu,
            MF_STRING | check(mode == BarMode::AutoHide),
            CMD_AUTO_HIDE,
            w!("Auto-hide"),
        )?;
        AppendMenuW(
            menu,
            MF_STRING | check(mode == BarMode::Floating),
            CMD_FLOATING,
            w!("Floating"),
        )?;
        AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null())?;
        AppendMenuW(menu, MF_STRING | check(blur), CMD_BLUR, w!("Blur"))?;
        AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null())?;
        AppendMenuW(menu, MF_STRING, CMD_EXIT, w!("Exit"))?;
    }
    Ok(())
}

/// Carries out a menu pick on the bar that showed the menu.
pub(super) fn execute(slot: &Slot, choice: MenuChoice) {
    let effects = match choice {
        MenuChoice::Mode(mode) => slot.bar.borrow_mut().set_mode(mode),
        MenuChoice::Blur(enabled) => slot.bar.borrow_mut().set_blur(enabled),
        MenuChoice::Exit => {
            // SAFETY: ends the daemon's message pump, which closes every bar.
            unsafe { PostQuitMessage(0) };
            return;
        }
    };
    apply(slot, effects);
}
