use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::animation::FRAME_MS;
use crate::fullscreen::FullScreenRegistry;
use crate::scheduler::ManualClock;

#[cfg(test)]
#[path = "tests/autohide_tests.rs"]
mod autohide_tests;
#[cfg(test)]
#[path = "tests/registration_tests.rs"]
mod registration_tests;

pub(super) const HWND: usize = 0x1234;
pub(super) const CALLBACK_ID: u32 = 0xC0DE;

/// Calls received by [`FakeAuthority`], in order.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Call {
    Register { handle: usize, size: BarSize },
    Unregister { handle: usize },
    SetPosition { handle: usize },
    Resize { handle: usize, size: BarSize },
    RegisterAutoHide { edge: Edge },
    UnregisterAutoHide { edge: Edge },
    DesktopArea,
    Activate,
    WindowPosChanged,
}

/// Records every call and answers with canned values.
pub(super) struct FakeAuthority {
    pub calls: RefCell<Vec<Call>>,
    pub registered: RefCell<Vec<usize>>,
    pub assigned: Cell<Rect>,
    pub reserved: Cell<f64>,
}

impl FakeAuthority {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            registered: RefCell::new(Vec::new()),
            assigned: Cell::new(Rect::new(0, 1040, 1920, 40)),
            reserved: Cell::new(0.0),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl DockingAuthority for FakeAuthority {
    fn register_bar(&self, registration: &Registration<'_>) -> u32 {
        self.calls.borrow_mut().push(Call::Register {
            handle: registration.handle,
            size: registration.size,
        });
        self.registered.borrow_mut().push(registration.handle);
        CALLBACK_ID
    }

    fn unregister_bar(&self, handle: usize, _size: BarSize) {
        self.calls.borrow_mut().push(Call::Unregister { handle });
        self.registered.borrow_mut().retain(|&h| h != handle);
    }

    fn set_position(&self, registration: &Registration<'_>) -> Rect {
        self.calls.borrow_mut().push(Call::SetPosition {
            handle: registration.handle,
        });
        self.assigned.get()
    }

    fn resize_bar(&self, registration: &Registration<'_>) {
        self.calls.borrow_mut().push(Call::Resize {
            handle: registration.handle,
            size: registration.size,
        });
    }

    fn register_auto_hide_bar(&self, _handle: usize, edge: Edge, _screen: &Screen) {
        self.calls.borrow_mut().push(Call::RegisterAutoHide { edge });
    }

    fn unregister_auto_hide_bar(&self, _handle: usize, edge: Edge, _screen: &Screen) {
        self.calls.borrow_mut().push(Call::UnregisterAutoHide { edge });
    }

    fn edge_reserved_thickness(&self, _handle: usize, _edge: Edge, _screen: &Screen) -> f64 {
        self.reserved.get()
    }

    fn set_usable_desktop_area(&self, _screen: &Screen) {
        self.calls.borrow_mut().push(Call::DesktopArea);
    }

    fn contains(&self, handle: usize) -> bool {
        self.registered.borrow().contains(&handle)
    }

    fn activate(&self, _handle: usize) {
        self.calls.borrow_mut().push(Call::Activate);
    }

    fn window_pos_changed(&self, _handle: usize) {
        self.calls.borrow_mut().push(Call::WindowPosChanged);
    }
}

/// Topology whose primary screen can be swapped by a test.
pub(super) struct FakeDisplays {
    pub primary: RefCell<Screen>,
}

impl DisplayTopology for FakeDisplays {
    fn primary_screen(&self) -> Option<Screen> {
        Some(self.primary.borrow().clone())
    }

    fn screens(&self) -> Vec<Screen> {
        vec![self.primary.borrow().clone()]
    }
}

/// Content that counts closing calls and owns a menu in its first 10 px.
pub(super) struct FakeContent {
    pub closing_calls: Rc<Cell<u32>>,
}

impl BarContent for FakeContent {
    fn closing(&mut self) {
        self.closing_calls.set(self.closing_calls.get() + 1);
    }

    fn has_context_menu(&self, x: i32, _y: i32) -> bool {
        x < 10
    }
}

pub(super) fn primary_screen() -> Screen {
    Screen::new(r"\\.\DISPLAY1", Rect::new(0, 0, 1920, 1080), true)
}

pub(super) fn secondary_screen() -> Screen {
    Screen::new(r"\\.\DISPLAY2", Rect::new(1920, 0, 1920, 1080), false)
}

/// A bar plus handles on every collaborator it talks to.
pub(super) struct Harness {
    pub bar: Bar,
    pub authority: Rc<FakeAuthority>,
    pub registry: Rc<FullScreenRegistry>,
    pub displays: Rc<FakeDisplays>,
    pub clock: Rc<ManualClock>,
    pub nominal: NominalScale,
    pub closing_calls: Rc<Cell<u32>>,
}

impl Harness {
    pub fn new(options: BarOptions, screen: Screen, running_as_shell: bool) -> Self {
        let authority = Rc::new(FakeAuthority::new());
        let registry = Rc::new(FullScreenRegistry::new());
        let displays = Rc::new(FakeDisplays {
            primary: RefCell::new(primary_screen()),
        });
        let clock = Rc::new(ManualClock::new(0));
        let nominal = NominalScale::default();

        let ctx = BarContext {
            authority: authority.clone(),
            full_screen: registry.clone(),
            displays: displays.clone(),
            clock: clock.clone(),
            nominal_scale: nominal.clone(),
            running_as_shell,
        };

        let closing_calls = Rc::new(Cell::new(0));
        let mut bar = Bar::new(options, screen, ctx);
        bar.attach_content(Box::new(FakeContent {
            closing_calls: closing_calls.clone(),
        }));

        Self {
            bar,
            authority,
            registry,
            displays,
            clock,
            nominal,
            closing_calls,
        }
    }

    /// Moves the clock forward frame by frame, ticking the bar after each
    /// step, and returns every effect produced.
    pub fn run_for(&mut self, ms: u64) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(FRAME_MS);
            self.clock.advance(step);
            remaining -= step;
            effects.extend(self.bar.tick());
        }
        effects
    }
}

pub(super) fn options(edge: Edge, mode: BarMode) -> BarOptions {
    BarOptions {
        edge,
        mode,
        ..BarOptions::default()
    }
}

/// An opened bar on the primary screen at scale 1.0.
pub(super) fn opened(edge: Edge, mode: BarMode) -> Harness {
    let mut h = Harness::new(options(edge, mode), primary_screen(), false);
    h.bar.open(HWND, 1.0);
    h
}

pub(super) fn translations(effects: &[Effect]) -> Vec<i32> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Translate { offset, .. } => Some(*offset),
            _ => None,
        })
        .collect()
}

// -- Bar basics --

#[test]
fn new_bar_starts_topmost_visible_and_opening() {
    let h = Harness::new(BarOptions::default(), primary_screen(), false);

    assert!(h.bar.is_topmost());
    assert!(h.bar.is_visible());
    assert!(h.bar.is_opening());
    assert!(!h.bar.is_closing());
    assert_eq!(h.bar.handle(), None);
    assert_eq!(h.bar.auto_hide_offset(), 0);
}

#[test]
fn vertical_bar_reports_thickness_times_dpi_by_screen_height() {
    // Arrange
    let mut h = Harness::new(options(Edge::Left, BarMode::Docked), primary_screen(), false);

    // Act
    h.bar.open(HWND, 1.5);

    // Assert
    let calls = h.authority.calls();
    assert!(calls.contains(&Call::Register {
        handle: HWND,
        size: BarSize {
            width: 60.0,
            height: 1080.0,
        },
    }));
}

#[test]
fn next_wakeup_is_none_when_idle() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::Docked);

    // Act
    h.run_for(200);

    // Assert
    assert_eq!(h.bar.next_wakeup(), None);
}

#[test]
fn next_wakeup_is_none_right_after_opening_floating() {
    let h = opened(Edge::Bottom, BarMode::Floating);

    assert_eq!(h.bar.next_wakeup(), None);
}

#[test]
fn next_wakeup_reports_pending_hide_start() {
    // Arrange / Act
    let h = opened(Edge::Bottom, BarMode::AutoHide);

    // Assert: the hide waits for the default 400 ms delay.
    assert_eq!(h.bar.next_wakeup(), Some(400));
}

#[test]
fn describe_mentions_edge_and_mode() {
    let h = opened(Edge::Top, BarMode::AutoHide);

    let text = h.bar.describe();

    assert!(text.contains("edge=top"));
    assert!(text.contains("mode=autohide"));
}
