//! Target rectangle computation for a bar on one screen edge.

use crate::Rect;
use crate::edge::{Edge, Orientation};

/// Everything needed to place a bar, in the units the caller holds them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Full screen bounds in physical pixels.
    pub bounds: Rect,
    pub edge: Edge,
    /// Desired thickness in DPI-independent units.
    pub thickness: f64,
    pub dpi_scale: f64,
    /// Space already reserved on the same edge by other bars, in
    /// DPI-independent units. Zero when the bar must touch the edge.
    pub edge_offset: f64,
}

/// Computes the bar rectangle for a placement.
///
/// Vertical bars span the full screen height, horizontal bars the full
/// width. Values stay fractional until the final conversion, which
/// rounds half to even.
pub fn resolve(placement: &Placement) -> Rect {
    let Placement {
        bounds,
        edge,
        thickness,
        dpi_scale,
        edge_offset,
    } = *placement;

    let size = thickness * dpi_scale;
    let offset = edge_offset * dpi_scale;

    match edge.orientation() {
        Orientation::Vertical => {
            let left = if edge == Edge::Left {
                f64::from(bounds.x) + offset
            } else {
                f64::from(bounds.right()) - size - offset
            };
            Rect::new(to_px(left), bounds.y, to_px(size), bounds.height)
        }
        Orientation::Horizontal => {
            let top = if edge == Edge::Top {
                f64::from(bounds.y) + offset
            } else {
                f64::from(bounds.bottom()) - size - offset
            };
            Rect::new(bounds.x, to_px(top), bounds.width, to_px(size))
        }
    }
}

fn to_px(value: f64) -> i32 {
    value.round_ties_even() as i32
}
