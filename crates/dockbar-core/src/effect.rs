use crate::Rect;
use crate::animation::Axis;

/// A window-system mutation requested by a bar transition.
///
/// Transitions return effects in the order the host must apply them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Move the window without touching z-order or activation. With
    /// `keep_size`, only the position is applied.
    Move { rect: Rect, keep_size: bool },
    /// Offset the content by `offset` physical pixels along `axis`.
    Translate { axis: Axis, offset: i32 },
    SetBlur(bool),
    /// Drop topmost and push the window to the bottom of the z-order.
    Concede,
    /// Set topmost and raise. The host calls [`crate::Bar::end_raise`]
    /// once it has applied this.
    Raise,
    SetVisible(bool),
    /// Keep the window out of Alt-Tab and the taskbar.
    HideFromTasks,
}

impl Effect {
    pub fn move_to(rect: Rect) -> Self {
        Self::Move {
            rect,
            keep_size: rect.has_negative_size(),
        }
    }
}
