//! Presence signals that keep an auto-hide bar on screen.

use crate::BarMode;

/// A single presence signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The pointer is over the bar.
    Pointer,
    /// A drag-and-drop operation is over the bar.
    Drag,
    /// A context menu owned by the bar is open.
    ContextMenu,
}

/// Independent presence flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    pub pointer_inside: bool,
    pub drag_inside: bool,
    pub context_menu_open: bool,
}

impl Presence {
    pub fn get(&self, signal: Signal) -> bool {
        match signal {
            Signal::Pointer => self.pointer_inside,
            Signal::Drag => self.drag_inside,
            Signal::ContextMenu => self.context_menu_open,
        }
    }

    /// Sets a signal. Returns whether the value changed.
    pub fn set(&mut self, signal: Signal, value: bool) -> bool {
        let slot = match signal {
            Signal::Pointer => &mut self.pointer_inside,
            Signal::Drag => &mut self.drag_inside,
            Signal::ContextMenu => &mut self.context_menu_open,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Whether any signal is currently asserted.
    pub fn any(&self) -> bool {
        self.pointer_inside || self.drag_inside || self.context_menu_open
    }
}

/// Whether the bar may retract right now.
pub fn allow_auto_hide(mode: BarMode, presence: &Presence, peek_active: bool) -> bool {
    mode == BarMode::AutoHide && !(presence.any() || peek_active)
}
