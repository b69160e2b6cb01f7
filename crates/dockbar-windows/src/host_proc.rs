use std::mem;

use dockbar_core::message::Message;
use dockbar_core::{Bar, CloseOutcome, Effect, Signal, log_debug};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DeleteObject, EndPaint, FillRect, PAINTSTRUCT, ScreenToClient,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{TME_LEAVE, TRACKMOUSEEVENT, TrackMouseEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, DestroyWindow, HWND_TOPMOST, KillTimer, SWP_NOZORDER, WINDOWPOS, WM_CLOSE,
    WM_CONTEXTMENU, WM_DESTROY, WM_MOUSELEAVE, WM_MOUSEMOVE, WM_PAINT, WM_TIMER,
    WM_WINDOWPOSCHANGING,
};

use super::{Slot, TICK_TIMER, apply, forget_slot, host_menu, repost, slot_for};

/// First message id handed out by `RegisterWindowMessageW`.
const REGISTERED_MESSAGE_BASE: u32 = 0xC000;

pub(super) unsafe extern "system" fn bar_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let Some(slot) = slot_for(hwnd) else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };

    match msg {
        WM_PAINT => {
            paint(&slot);
            LRESULT(0)
        }
        WM_TIMER if wparam.0 == TICK_TIMER => {
            run(&slot, |bar| bar.tick());
            LRESULT(0)
        }
        WM_MOUSEMOVE => {
            if !slot.tracking_mouse.get() {
                track_mouse_leave(hwnd);
                slot.tracking_mouse.set(true);
                run(&slot, |bar| bar.set_presence(Signal::Pointer, true));
            }
            LRESULT(0)
        }
        WM_MOUSELEAVE => {
            slot.tracking_mouse.set(false);
            run(&slot, |bar| bar.set_presence(Signal::Pointer, false));
            LRESULT(0)
        }
        WM_CONTEXTMENU => {
            context_menu(&slot, lparam);
            LRESULT(0)
        }
        WM_CLOSE => {
            let outcome = match slot.bar.try_borrow_mut() {
                Ok(mut bar) => bar.request_close(),
                Err(_) => CloseOutcome::AlreadyClosing,
            };
            if outcome == CloseOutcome::Closed {
                // SAFETY: destroying our own window.
                unsafe {
                    let _ = DestroyWindow(hwnd);
                }
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            // SAFETY: the timer belongs to this window.
            unsafe {
                let _ = KillTimer(Some(hwnd), TICK_TIMER);
            }
            forget_slot(hwnd);
            LRESULT(0)
        }
        WM_WINDOWPOSCHANGING => {
            window_pos_changing(&slot, lparam);
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }
        _ => {
            let Ok(mut bar) = slot.bar.try_borrow_mut() else {
                // Re-entered while the bar is mid-transition. Notifications
                // from the shell are retried once the transition finishes.
                if msg >= REGISTERED_MESSAGE_BASE {
                    repost(hwnd, msg, wparam, lparam);
                    return LRESULT(0);
                }
                return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
            };

            let dispatch = bar.dispatch(Message::decode(msg, wparam.0, lparam.0));
            drop(bar);
            let handled = dispatch.handled;
            apply(&slot, dispatch.effects);

            if handled {
                LRESULT(0)
            } else {
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
        }
    }
}

/// Runs a bar transition and applies its effects. Skipped if the bar is
/// already borrowed further up the stack.
fn run(slot: &Slot, f: impl FnOnce(&mut Bar) -> Vec<Effect>) {
    let effects = match slot.bar.try_borrow_mut() {
        Ok(mut bar) => f(&mut bar),
        Err(_) => return,
    };
    apply(slot, effects);
}

fn window_pos_changing(slot: &Slot, lparam: LPARAM) {
    if lparam.0 == 0 {
        return;
    }

    // SAFETY: for WM_WINDOWPOSCHANGING, lparam points to a WINDOWPOS the
    // system reads back after we return.
    let pos = unsafe { &mut *(lparam.0 as *mut WINDOWPOS) };
    let preserves_z_order = (pos.flags & SWP_NOZORDER).0 != 0;

    let Ok(mut bar) = slot.bar.try_borrow_mut() else {
        return;
    };
    let dispatch = bar.dispatch(Message::WindowPosChanging { preserves_z_order });
    drop(bar);

    if dispatch.force_topmost {
        pos.hwndInsertAfter = HWND_TOPMOST;
        pos.flags = pos.flags & !SWP_NOZORDER;
    }
}

fn track_mouse_leave(hwnd: HWND) {
    let mut tme = TRACKMOUSEEVENT {
        cbSize: mem::size_of::<TRACKMOUSEEVENT>() as u32,
        dwFlags: TME_LEAVE,
        hwndTrack: hwnd,
        dwHoverTime: 0,
    };

    // SAFETY: `tme` is fully initialised and outlives the call.
    unsafe {
        let _ = TrackMouseEvent(&mut tme);
    }
}

fn context_menu(slot: &Slot, lparam: LPARAM) {
    let hwnd = slot.window.hwnd();
    let mut screen = POINT {
        x: (lparam.0 & 0xFFFF) as u16 as i16 as i32,
        y: ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32,
    };

    let mut client = POINT::default();
    if screen.x == -1 && screen.y == -1 {
        // Opened from the keyboard: anchor at the window origin.
        let base = slot.base.get();
        screen = POINT {
            x: base.x,
            y: base.y,
        };
    } else {
        client = screen;
        // SAFETY: converts a point in place for our own window.
        unsafe {
            let _ = ScreenToClient(hwnd, &mut client);
        }
    }

    run(slot, |bar| bar.context_menu_opening(client.x, client.y));
    let open = slot
        .bar
        .try_borrow()
        .is_ok_and(|bar| bar.presence().context_menu_open);
    if !open {
        return;
    }

    let choice = host_menu::show(slot, screen);
    run(slot, |bar| bar.set_presence(Signal::ContextMenu, false));

    if let Some(choice) = choice {
        log_debug!("Context menu: {choice:?}");
        host_menu::execute(slot, choice);
    }
}

fn paint(slot: &Slot) {
    let hwnd = slot.window.hwnd();
    let mut ps = PAINTSTRUCT::default();

    // SAFETY: standard BeginPaint/EndPaint pair on our own window; the
    // brush is deleted before returning.
    unsafe {
        let hdc = BeginPaint(hwnd, &mut ps);
        let brush = CreateSolidBrush(slot.background);
        FillRect(hdc, &ps.rcPaint, brush);
        let _ = DeleteObject(brush.into());
        let _ = EndPaint(hwnd, &ps);
    }
}
