//! Docking authority backed by the shell's AppBar service.

use std::cell::RefCell;
use std::mem;

use dockbar_core::authority::{BarSize, DockingAuthority, Registration};
use dockbar_core::{Edge, Orientation, Rect, Screen, log_debug, log_warn};
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::UI::Shell::{
    ABM_ACTIVATE, ABM_NEW, ABM_QUERYPOS, ABM_REMOVE, ABM_SETPOS, ABM_WINDOWPOSCHANGED, APPBARDATA,
    SHAppBarMessage,
};
use windows::Win32::UI::WindowsAndMessaging::{
    RegisterWindowMessageW, SPI_SETWORKAREA, SPIF_SENDCHANGE, SystemParametersInfoW,
};
use windows::core::w;

/// `ABM_SETAUTOHIDEBAREX`: per-monitor auto-hide registration.
const ABM_SETAUTOHIDEBAREX: u32 = 0x0000_000C;

/// A docked bar as far as this process knows.
#[derive(Debug, Clone)]
struct Docked {
    handle: usize,
    edge: Edge,
    device: String,
    /// Reserved thickness in DPI-independent units.
    thickness: f64,
    /// Reserved thickness in pixels at the bar's current scale.
    pixels: i32,
}

/// Thickness of a bar across its edge, in DPI-independent units and in
/// pixels.
fn measure(registration: &Registration<'_>) -> (f64, i32) {
    let pixels = match registration.edge.orientation() {
        Orientation::Vertical => registration.size.width,
        Orientation::Horizontal => registration.size.height,
    };
    (pixels / registration.dpi_scale, pixels.round() as i32)
}

/// Forwards registrations to `SHAppBarMessage` and remembers which bars
/// of this process hold which edge, in registration order.
pub struct ShellAppBars {
    callback_id: u32,
    docked: RefCell<Vec<Docked>>,
}

impl ShellAppBars {
    pub fn new() -> Self {
        // SAFETY: RegisterWindowMessageW returns the same id for the same
        // string process-wide; 0 means failure and is logged.
        let callback_id = unsafe { RegisterWindowMessageW(w!("DockbarAppBarNotify")) };
        if callback_id == 0 {
            log_warn!("RegisterWindowMessageW failed; AppBar notifications disabled");
        }

        Self {
            callback_id,
            docked: RefCell::new(Vec::new()),
        }
    }

    fn message(&self, msg: u32, data: &mut APPBARDATA) -> usize {
        // SAFETY: `data` is a fully initialised APPBARDATA with cbSize set.
        unsafe { SHAppBarMessage(msg, data) }
    }

    /// Thickness reserved by this process on `screen`, per edge, in pixels.
    fn reserved_pixels(&self, screen: &Screen, edge: Edge) -> i32 {
        self.docked
            .borrow()
            .iter()
            .filter(|d| d.device == screen.device && d.edge == edge)
            .map(|d| d.pixels)
            .sum()
    }
}

impl Default for ShellAppBars {
    fn default() -> Self {
        Self::new()
    }
}

fn appbar_data(handle: usize, callback_id: u32, edge: Edge, rc: RECT) -> APPBARDATA {
    APPBARDATA {
        cbSize: mem::size_of::<APPBARDATA>() as u32,
        hWnd: HWND(handle as *mut _),
        uCallbackMessage: callback_id,
        uEdge: edge.abe(),
        rc,
        lParam: LPARAM(0),
    }
}

fn to_rect(r: Rect) -> RECT {
    RECT {
        left: r.x,
        top: r.y,
        right: r.right(),
        bottom: r.bottom(),
    }
}

/// Proposes the full edge strip of `screen` with the bar's pixel size.
fn proposal(registration: &Registration<'_>) -> RECT {
    let mut rc = to_rect(registration.screen.bounds);
    let width = registration.size.width.round() as i32;
    let height = registration.size.height.round() as i32;
    match registration.edge {
        Edge::Left => rc.right = rc.left + width,
        Edge::Right => rc.left = rc.right - width,
        Edge::Top => rc.bottom = rc.top + height,
        Edge::Bottom => rc.top = rc.bottom - height,
    }
    rc
}

/// After `ABM_QUERYPOS` moved the docked side, restores the size on the
/// opposite side.
fn keep_size(rc: &mut RECT, edge: Edge, size: BarSize) {
    let width = size.width.round() as i32;
    let height = size.height.round() as i32;
    match edge {
        Edge::Left => rc.right = rc.left + width,
        Edge::Right => rc.left = rc.right - width,
        Edge::Top => rc.bottom = rc.top + height,
        Edge::Bottom => rc.top = rc.bottom - height,
    }
}

impl DockingAuthority for ShellAppBars {
    fn register_bar(&self, registration: &Registration<'_>) -> u32 {
        let mut abd = appbar_data(
            registration.handle,
            self.callback_id,
            registration.edge,
            proposal(registration),
        );
        if self.message(ABM_NEW, &mut abd) == 0 {
            log_warn!("ABM_NEW refused bar 0x{:X}", registration.handle);
        }

        let (thickness, pixels) = measure(registration);
        self.docked.borrow_mut().push(Docked {
            handle: registration.handle,
            edge: registration.edge,
            device: registration.screen.device.clone(),
            thickness,
            pixels,
        });

        self.callback_id
    }

    fn unregister_bar(&self, handle: usize, _size: BarSize) {
        let mut abd = appbar_data(handle, self.callback_id, Edge::Left, RECT::default());
        self.message(ABM_REMOVE, &mut abd);
        self.docked.borrow_mut().retain(|d| d.handle != handle);
    }

    fn set_position(&self, registration: &Registration<'_>) -> Rect {
        let mut abd = appbar_data(
            registration.handle,
            self.callback_id,
            registration.edge,
            proposal(registration),
        );

        self.resize_bar(registration);
        self.message(ABM_QUERYPOS, &mut abd);
        keep_size(&mut abd.rc, registration.edge, registration.size);
        self.message(ABM_SETPOS, &mut abd);

        let rc = abd.rc;
        log_debug!(
            "ABM_SETPOS for 0x{:X}: ({},{})-({},{})",
            registration.handle,
            rc.left,
            rc.top,
            rc.right,
            rc.bottom
        );
        Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom)
    }

    fn resize_bar(&self, registration: &Registration<'_>) {
        let (thickness, pixels) = measure(registration);
        let mut docked = self.docked.borrow_mut();
        if let Some(bar) = docked.iter_mut().find(|d| d.handle == registration.handle) {
            bar.edge = registration.edge;
            bar.device = registration.screen.device.clone();
            bar.thickness = thickness;
            bar.pixels = pixels;
        }
    }

    fn register_auto_hide_bar(&self, handle: usize, edge: Edge, screen: &Screen) {
        let mut abd = appbar_data(handle, self.callback_id, edge, to_rect(screen.bounds));
        abd.lParam = LPARAM(1);
        if self.message(ABM_SETAUTOHIDEBAREX, &mut abd) == 0 {
            log_warn!(
                "{} edge of {} already has an auto-hide bar",
                edge.as_str(),
                screen.device
            );
        }
    }

    fn unregister_auto_hide_bar(&self, handle: usize, edge: Edge, screen: &Screen) {
        let mut abd = appbar_data(handle, self.callback_id, edge, to_rect(screen.bounds));
        self.message(ABM_SETAUTOHIDEBAREX, &mut abd);
    }

    fn edge_reserved_thickness(&self, handle: usize, edge: Edge, screen: &Screen) -> f64 {
        self.docked
            .borrow()
            .iter()
            .take_while(|d| d.handle != handle)
            .filter(|d| d.device == screen.device && d.edge == edge)
            .map(|d| d.thickness)
            .sum()
    }

    fn set_usable_desktop_area(&self, screen: &Screen) {
        let b = screen.bounds;
        let mut work = RECT {
            left: b.x + self.reserved_pixels(screen, Edge::Left),
            top: b.y + self.reserved_pixels(screen, Edge::Top),
            right: b.right() - self.reserved_pixels(screen, Edge::Right),
            bottom: b.bottom() - self.reserved_pixels(screen, Edge::Bottom),
        };

        // SAFETY: SPI_SETWORKAREA reads a RECT from pvParam.
        let result = unsafe {
            SystemParametersInfoW(
                SPI_SETWORKAREA,
                0,
                Some(&mut work as *mut RECT as *mut _),
                SPIF_SENDCHANGE,
            )
        };
        if let Err(e) = result {
            log_warn!("SPI_SETWORKAREA failed for {}: {e}", screen.device);
        }
    }

    fn contains(&self, handle: usize) -> bool {
        self.docked.borrow().iter().any(|d| d.handle == handle)
    }

    fn activate(&self, handle: usize) {
        let mut abd = appbar_data(handle, self.callback_id, Edge::Left, RECT::default());
        self.message(ABM_ACTIVATE, &mut abd);
    }

    fn window_pos_changed(&self, handle: usize) {
        let mut abd = appbar_data(handle, self.callback_id, Edge::Left, RECT::default());
        self.message(ABM_WINDOWPOSCHANGED, &mut abd);
    }
}
