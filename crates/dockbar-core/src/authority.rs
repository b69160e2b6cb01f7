use crate::Rect;
use crate::edge::Edge;
use crate::screen::Screen;

/// A bar's size in physical pixels, as reported to the docking authority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSize {
    pub width: f64,
    pub height: f64,
}

/// What a bar tells the docking authority about itself.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub handle: usize,
    pub edge: Edge,
    pub screen: &'a Screen,
    pub size: BarSize,
    /// Scale the size was computed with, so the authority can keep
    /// reservations in DPI-independent units.
    pub dpi_scale: f64,
}

/// The external arbiter of screen-edge space.
///
/// Shared by every bar in the process. Calls are synchronous and cheap;
/// implementations use interior mutability for their bookkeeping.
pub trait DockingAuthority {
    /// Starts reserving space for a bar. Returns the message id the
    /// authority will use for its notifications to this bar.
    fn register_bar(&self, registration: &Registration<'_>) -> u32;

    /// Stops reserving space for a bar.
    fn unregister_bar(&self, handle: usize, size: BarSize);

    /// Negotiates a position for a registered bar and returns the
    /// rectangle the authority assigned.
    fn set_position(&self, registration: &Registration<'_>) -> Rect;

    /// Updates the size kept for a registered bar without negotiating.
    fn resize_bar(&self, registration: &Registration<'_>);

    fn register_auto_hide_bar(&self, handle: usize, edge: Edge, screen: &Screen);

    fn unregister_auto_hide_bar(&self, handle: usize, edge: Edge, screen: &Screen);

    /// Thickness already reserved on `edge` of `screen` by bars that
    /// take precedence over `handle`, in DPI-independent units.
    fn edge_reserved_thickness(&self, handle: usize, edge: Edge, screen: &Screen) -> f64;

    /// Publishes the usable desktop area for non-bar windows. Only used
    /// when this process is the shell.
    fn set_usable_desktop_area(&self, screen: &Screen);

    /// Whether the bar is currently in the authority's managed set.
    fn contains(&self, handle: usize) -> bool;

    /// Lets the authority re-assert ordering after the bar was activated.
    fn activate(&self, handle: usize);

    /// Lets the authority re-assert ordering after the bar moved.
    fn window_pos_changed(&self, handle: usize);
}
