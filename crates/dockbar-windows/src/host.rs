//! Bar windows: one per screen, each a topmost tool popup driven by a
//! `dockbar_core::Bar`.
//!
//! The window procedure hands native messages to the bar and applies
//! the effects it returns. No `RefCell` borrow of a bar is held while
//! effects are applied: `SetWindowPos` re-enters the window procedure
//! synchronously with `WM_WINDOWPOSCHANGING`.

#[path = "host_menu.rs"]
mod host_menu;
#[path = "host_proc.rs"]
mod host_proc;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Once;

use dockbar_core::config::parse_hex_color;
use dockbar_core::dpi::NominalScale;
use dockbar_core::ipc::{Command, Response};
use dockbar_core::{
    Axis, Bar, BarContent, BarContext, Clock, Config, DisplayTopology, Effect, FullScreenRegistry,
    MonotonicClock, Rect, WindowResult, log_debug, log_info, log_warn,
};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, IDC_ARROW, KillTimer, LoadCursorW, PostMessageW, RegisterClassW,
    SendMessageW, SetTimer, WM_CLOSE, WNDCLASSW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::w;

use crate::appbar::ShellAppBars;
use crate::monitor::Win32Displays;
use crate::window::BarWindow;
use crate::{dpi, fullscreen};

/// Timer that drives `Bar::tick`.
const TICK_TIMER: usize = 0xDB01;

/// State the window procedure needs for one bar window.
struct Slot {
    window: BarWindow,
    bar: RefCell<Bar>,
    clock: Rc<MonotonicClock>,
    background: COLORREF,
    /// Where the bar was last placed, before the auto-hide offset.
    base: Cell<Rect>,
    /// Auto-hide offset currently rendered.
    offset: Cell<(Axis, i32)>,
    /// Whether a `WM_MOUSELEAVE` has been requested.
    tracking_mouse: Cell<bool>,
}

thread_local! {
    static SLOTS: RefCell<Vec<Rc<Slot>>> = const { RefCell::new(Vec::new()) };
}

fn slot_for(hwnd: HWND) -> Option<Rc<Slot>> {
    SLOTS.with(|slots| {
        slots
            .borrow()
            .iter()
            .find(|s| s.window.hwnd() == hwnd)
            .cloned()
    })
}

fn forget_slot(hwnd: HWND) {
    SLOTS.with(|slots| slots.borrow_mut().retain(|s| s.window.hwnd() != hwnd));
}

/// Content of a plain bar: a solid background with a settings menu
/// anywhere on it.
struct MenuContent;

impl BarContent for MenuContent {
    fn closing(&mut self) {
        log_debug!("Bar content closing");
    }

    fn has_context_menu(&self, _x: i32, _y: i32) -> bool {
        true
    }
}

/// Owns every bar window of the daemon's UI thread.
pub struct BarHost {
    registry: Rc<FullScreenRegistry>,
    slots: Vec<Rc<Slot>>,
    peek_ms: u64,
}

static REGISTER_CLASS: Once = Once::new();
const CLASS_NAME: windows::core::PCWSTR = w!("DockbarWindow");

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        // SAFETY: registers a window class whose procedure outlives
        // every window created from it.
        unsafe {
            let instance = GetModuleHandleW(None).unwrap_or_default();
            let wc = WNDCLASSW {
                lpfnWndProc: Some(host_proc::bar_wnd_proc),
                hInstance: instance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                log_warn!("Failed to register DockbarWindow class");
            }
        }
    });
}

impl BarHost {
    /// Creates and opens one bar per attached screen, primary first.
    pub fn create(config: &Config) -> WindowResult<Self> {
        ensure_class_registered();

        let registry = Rc::new(FullScreenRegistry::new());
        let displays = Rc::new(Win32Displays);
        let clock = Rc::new(MonotonicClock::new());
        let ctx = BarContext {
            authority: Rc::new(ShellAppBars::new()),
            full_screen: registry.clone(),
            displays: displays.clone(),
            clock: clock.clone(),
            nominal_scale: NominalScale::default(),
            running_as_shell: config.shell.running_as_shell,
        };

        let screens = displays.screens();
        if screens.is_empty() {
            return Err("no displays attached".into());
        }

        let background = background_color(&config.bar.background);
        let mut slots = Vec::with_capacity(screens.len());

        for screen in screens {
            let device = screen.device.clone();
            let mut bar = Bar::new(config.bar_options(), screen, ctx.clone());
            bar.attach_content(Box::new(MenuContent));

            let window = create_window()?;
            let slot = Rc::new(Slot {
                window,
                bar: RefCell::new(bar),
                clock: clock.clone(),
                background,
                base: Cell::new(Rect::default()),
                offset: Cell::new((Axis::Y, 0)),
                tracking_mouse: Cell::new(false),
            });
            SLOTS.with(|s| s.borrow_mut().push(slot.clone()));

            let scale = dpi::window_scale(window.hwnd());
            let effects = slot.bar.borrow_mut().open(window.raw(), scale);
            apply(&slot, effects);
            window.set_visible(true);

            if config.bar.blur {
                let effects = slot.bar.borrow_mut().set_blur(true);
                apply(&slot, effects);
            }

            log_info!("Bar opened on {device}");
            slots.push(slot);
        }

        Ok(Self {
            registry,
            slots,
            peek_ms: config.bar.peek_ms,
        })
    }

    /// Re-checks the foreground window and tells subscribed bars when
    /// the full-screen set changed.
    pub fn poll_full_screen(&self) {
        let changed = self.registry.replace_all(fullscreen::detect());
        let screens_changed = self.registry.take_screens_changed();
        if !changed && !screens_changed {
            return;
        }

        for handle in self.registry.subscribers() {
            if let Some(slot) = self.slots.iter().find(|s| s.window.raw() == handle) {
                let effects = slot.bar.borrow_mut().on_full_screen_changed();
                apply(slot, effects);
            }
        }
    }

    /// Runs one CLI command against every bar. `Stop` is answered here
    /// and carried out by the caller.
    pub fn handle_command(&self, command: &Command) -> Response {
        match command {
            Command::Stop => Response::ok_with_message("Shutting down."),
            Command::Status => {
                let lines: Vec<String> =
                    self.slots.iter().map(|s| s.bar.borrow().describe()).collect();
                Response::ok_with_message(lines.join("\n"))
            }
            Command::Peek { ms } => {
                let duration = ms.unwrap_or(self.peek_ms);
                self.for_each_bar(|bar| bar.peek(duration));
                Response::ok()
            }
            Command::SetMode { mode } => {
                self.for_each_bar(|bar| bar.set_mode(*mode));
                Response::ok_with_message(format!("Mode set to {mode}."))
            }
            Command::SetBlur { enabled } => {
                self.for_each_bar(|bar| bar.set_blur(*enabled));
                Response::ok()
            }
        }
    }

    /// Allows closing and closes every bar window.
    pub fn close_all(&self) {
        for slot in &self.slots {
            slot.bar.borrow_mut().set_allow_close(true);

            // SAFETY: WM_CLOSE is handled synchronously by our own
            // window procedure, which destroys the window.
            unsafe {
                let _ = SendMessageW(slot.window.hwnd(), WM_CLOSE, None, None);
            }
        }
    }

    fn for_each_bar(&self, mut f: impl FnMut(&mut Bar) -> Vec<Effect>) {
        for slot in &self.slots {
            let effects = f(&mut slot.bar.borrow_mut());
            apply(slot, effects);
        }
    }
}

fn create_window() -> WindowResult<BarWindow> {
    // SAFETY: the class is registered; the window starts hidden at zero
    // size and is positioned by the bar's opening sequence.
    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_TOOLWINDOW | WS_EX_TOPMOST,
            CLASS_NAME,
            w!("dockbar"),
            WS_POPUP,
            0,
            0,
            0,
            0,
            None,
            None,
            None,
            None,
        )?
    };
    Ok(BarWindow::new(hwnd))
}

fn background_color(hex: &str) -> COLORREF {
    let (r, g, b) = parse_hex_color(hex).unwrap_or((0x1e, 0x1e, 0x2e));
    COLORREF(u32::from(r) | (u32::from(g) << 8) | (u32::from(b) << 16))
}

/// `base` shifted by the auto-hide offset along `axis`.
fn shifted(base: Rect, axis: Axis, offset: i32) -> Rect {
    match axis {
        Axis::X => Rect::new(base.x + offset, base.y, base.width, base.height),
        Axis::Y => Rect::new(base.x, base.y + offset, base.width, base.height),
    }
}

/// Applies effects in order, then re-arms the tick timer.
///
/// Must be called without a borrow of `slot.bar` held.
fn apply(slot: &Slot, effects: Vec<Effect>) {
    let window = slot.window;

    for effect in effects {
        match effect {
            Effect::Move { rect, keep_size } => {
                let base = if keep_size {
                    let current = slot.base.get();
                    Rect::new(rect.x, rect.y, current.width, current.height)
                } else {
                    rect
                };
                slot.base.set(base);
                let (axis, offset) = slot.offset.get();
                if let Err(e) = window.move_to(shifted(base, axis, offset), keep_size) {
                    log_warn!("Failed to move bar: {e}");
                }
            }
            Effect::Translate { axis, offset } => {
                slot.offset.set((axis, offset));
                if let Err(e) = window.move_to(shifted(slot.base.get(), axis, offset), true) {
                    log_warn!("Failed to slide bar: {e}");
                }
            }
            Effect::SetBlur(enable) => {
                if let Err(e) = window.set_blur(enable) {
                    log_warn!("Failed to set blur: {e}");
                }
            }
            Effect::Concede => window.concede(),
            Effect::Raise => {
                window.raise();
                slot.bar.borrow_mut().end_raise();
            }
            Effect::SetVisible(visible) => window.set_visible(visible),
            Effect::HideFromTasks => window.hide_from_tasks(),
        }
    }

    arm_tick_timer(slot);
}

fn arm_tick_timer(slot: &Slot) {
    let hwnd = slot.window.hwnd();
    let wakeup = slot.bar.borrow().next_wakeup();

    // SAFETY: timers belong to our own window and are replaced or
    // killed by id.
    unsafe {
        match wakeup {
            Some(at) => {
                let delay = at.saturating_sub(slot.clock.now_ms()).max(1);
                let delay = u32::try_from(delay).unwrap_or(u32::MAX);
                let _ = SetTimer(Some(hwnd), TICK_TIMER, delay, None);
            }
            None => {
                let _ = KillTimer(Some(hwnd), TICK_TIMER);
            }
        }
    }
}

/// Posts a message back to the window so it's handled after the
/// current re-entrant call unwinds.
fn repost(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) {
    // SAFETY: posting to our own window.
    unsafe {
        let _ = PostMessageW(Some(hwnd), msg, wparam, lparam);
    }
}
