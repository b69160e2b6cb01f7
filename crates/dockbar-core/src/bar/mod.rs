//! The dockable bar.
//!
//! [`Bar`] is a single concrete type configured by [`BarOptions`] and
//! wired to shared collaborators through [`BarContext`]. Every mutating
//! operation is an explicit transition that returns the window-system
//! [`Effect`]s to apply, in order. Calls into the docking authority,
//! the full-screen tracker, and the display topology happen inside the
//! transition.

mod arbitration;
mod autohide;
mod dispatch;
mod lifecycle;
mod position;
mod registration;
mod screen_change;

use std::rc::Rc;

pub use lifecycle::CloseOutcome;
pub use screen_change::ScreenChangeReason;

use crate::animation::{Animator, Axis, AutoHideTiming};
use crate::authority::{BarSize, DockingAuthority, Registration};
use crate::dpi::NominalScale;
use crate::edge::{Edge, FlowDirection, Orientation};
use crate::fullscreen::FullScreenTracker;
use crate::presence::Presence;
use crate::scheduler::{Clock, Scheduler, Task, TaskHandle};
use crate::screen::{DisplayTopology, Screen};
use crate::{BarMode, Effect, Rect};

/// Collaborators shared by every bar in the process.
#[derive(Clone)]
pub struct BarContext {
    pub authority: Rc<dyn DockingAuthority>,
    pub full_screen: Rc<dyn FullScreenTracker>,
    pub displays: Rc<dyn DisplayTopology>,
    pub clock: Rc<dyn Clock>,
    pub nominal_scale: NominalScale,
    /// Whether this process replaces the desktop shell.
    pub running_as_shell: bool,
}

/// Content drawn inside the bar, supplied by the caller.
///
/// A bar without content has nothing to animate, so auto-hide motions
/// are skipped until content is attached.
pub trait BarContent {
    /// Called on every close request, before the close is allowed or vetoed.
    fn closing(&mut self) {}

    /// Whether the content owns a context menu at the given client point.
    fn has_context_menu(&self, _x: i32, _y: i32) -> bool {
        false
    }
}

/// Static configuration of one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarOptions {
    pub edge: Edge,
    pub mode: BarMode,
    /// Width for vertical bars, height for horizontal ones, in
    /// DPI-independent units.
    pub thickness: f64,
    /// Ignore space reserved by other bars and always touch the edge.
    pub requires_screen_edge: bool,
    /// Whether the window supports a transparent, blurred background.
    pub allows_transparency: bool,
    pub flow_direction: FlowDirection,
    pub timing: AutoHideTiming,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            edge: Edge::Bottom,
            mode: BarMode::Docked,
            thickness: 40.0,
            requires_screen_edge: false,
            allows_transparency: true,
            flow_direction: FlowDirection::LeftToRight,
            timing: AutoHideTiming::default(),
        }
    }
}

/// A dockable shell bar.
pub struct Bar {
    ctx: BarContext,
    content: Option<Box<dyn BarContent>>,

    screen: Screen,
    edge: Edge,
    mode: BarMode,
    flow_direction: FlowDirection,
    desired_thickness: f64,
    dpi_scale: f64,
    requires_screen_edge: bool,
    allows_transparency: bool,
    timing: AutoHideTiming,

    /// Native window handle, assigned once by [`Bar::open`].
    handle: Option<usize>,

    presence: Presence,
    peek: Option<TaskHandle>,
    scheduler: Scheduler,
    animator: Animator,
    /// Last offset reported through [`Effect::Translate`], in pixels.
    rendered_offset: i32,

    enable_blur: bool,
    topmost: bool,
    raising: bool,
    visible: bool,

    callback_id: Option<u32>,
    last_assigned: Option<Rect>,

    allow_close: bool,
    is_closing: bool,
    is_opening: bool,
    process_screen_changes: bool,
}

impl Bar {
    /// Creates a bar that is not yet attached to a native window.
    pub fn new(options: BarOptions, screen: Screen, ctx: BarContext) -> Self {
        let axis = match options.edge.orientation() {
            Orientation::Horizontal => Axis::Y,
            Orientation::Vertical => Axis::X,
        };

        Self {
            ctx,
            content: None,
            screen,
            edge: options.edge,
            mode: options.mode,
            flow_direction: options.flow_direction,
            desired_thickness: options.thickness,
            dpi_scale: 1.0,
            requires_screen_edge: options.requires_screen_edge,
            allows_transparency: options.allows_transparency,
            timing: options.timing,
            handle: None,
            presence: Presence::default(),
            peek: None,
            scheduler: Scheduler::new(),
            animator: Animator::new(axis),
            rendered_offset: 0,
            enable_blur: false,
            topmost: true,
            raising: false,
            visible: true,
            callback_id: None,
            last_assigned: None,
            allow_close: false,
            is_closing: false,
            is_opening: true,
            process_screen_changes: true,
        }
    }

    /// Attaches the content the auto-hide animation slides.
    pub fn attach_content(&mut self, content: Box<dyn BarContent>) {
        self.content = Some(content);
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn handle(&self) -> Option<usize> {
        self.handle
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn mode(&self) -> BarMode {
        self.mode
    }

    pub fn orientation(&self) -> Orientation {
        self.edge.orientation()
    }

    pub fn desired_thickness(&self) -> f64 {
        self.desired_thickness
    }

    pub fn dpi_scale(&self) -> f64 {
        self.dpi_scale
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_topmost(&self) -> bool {
        self.topmost
    }

    pub fn is_raising(&self) -> bool {
        self.raising
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_opening(&self) -> bool {
        self.is_opening
    }

    pub fn is_closing(&self) -> bool {
        self.is_closing
    }

    pub fn allow_close(&self) -> bool {
        self.allow_close
    }

    pub fn blur_enabled(&self) -> bool {
        self.enable_blur
    }

    /// Message id the docking authority uses for notifications to this bar.
    pub fn callback_id(&self) -> Option<u32> {
        self.callback_id
    }

    /// Last rectangle assigned by the docking authority.
    pub fn last_assigned(&self) -> Option<Rect> {
        self.last_assigned
    }

    /// Current auto-hide offset in physical pixels.
    pub fn auto_hide_offset(&self) -> i32 {
        self.rendered_offset
    }

    /// Enables or suppresses screen-change processing on the primary bar.
    /// DPI changes are processed regardless.
    #[cfg(test)]
    pub(crate) fn set_process_screen_changes(&mut self, enabled: bool) {
        self.process_screen_changes = enabled;
    }

    /// Runs due tasks and advances the auto-hide animation.
    pub fn tick(&mut self) -> Vec<Effect> {
        let now = self.now();
        let mut effects = Vec::new();
        for (handle, task) in self.scheduler.take_due(now) {
            effects.extend(self.run_task(handle, task));
        }
        effects.extend(self.pump_animation());
        effects
    }

    /// When the host should next call [`Bar::tick`].
    pub fn next_wakeup(&self) -> Option<u64> {
        let now = self.now();
        match (self.scheduler.next_deadline(), self.animator.next_frame(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// One-line state summary for status queries.
    pub fn describe(&self) -> String {
        format!(
            "edge={} mode={} screen={} dpi={:.2} topmost={} offset={}",
            self.edge.as_str(),
            self.mode,
            self.screen.device,
            self.dpi_scale,
            self.topmost,
            self.rendered_offset
        )
    }

    fn run_task(&mut self, handle: TaskHandle, task: Task) -> Vec<Effect> {
        match task {
            Task::DelayedPosition => self.set_position(),
            Task::CorrectivePosition => self.reapply_assigned(),
            Task::PeekExpiry => self.peek_expired(handle),
        }
    }

    fn now(&self) -> u64 {
        self.ctx.clock.now_ms()
    }

    /// Size reported to the authority: the desired thickness scaled by DPI
    /// on one axis, the full screen span on the other.
    fn bar_size(&self) -> BarSize {
        let thickness = self.desired_thickness * self.dpi_scale;
        let bounds = self.screen.bounds;
        match self.orientation() {
            Orientation::Vertical => BarSize {
                width: thickness,
                height: f64::from(bounds.height),
            },
            Orientation::Horizontal => BarSize {
                width: f64::from(bounds.width),
                height: thickness,
            },
        }
    }

    fn registration(&self, handle: usize) -> Registration<'_> {
        Registration {
            handle,
            edge: self.edge,
            screen: &self.screen,
            size: self.bar_size(),
            dpi_scale: self.dpi_scale,
        }
    }
}

#[cfg(test)]
mod tests;
