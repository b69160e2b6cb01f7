use crate::Rect;

/// A monitor as seen by a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Device name (e.g. `\\.\DISPLAY1`). Stable across topology changes.
    pub device: String,
    /// Full monitor bounds in physical pixels.
    pub bounds: Rect,
    pub primary: bool,
}

impl Screen {
    pub fn new(device: impl Into<String>, bounds: Rect, primary: bool) -> Self {
        Self {
            device: device.into(),
            bounds,
            primary,
        }
    }
}

/// Enumerates the current display topology.
pub trait DisplayTopology {
    /// Returns the current primary screen, if any monitor is attached.
    fn primary_screen(&self) -> Option<Screen>;

    /// Returns every attached screen, primary first.
    fn screens(&self) -> Vec<Screen>;
}
