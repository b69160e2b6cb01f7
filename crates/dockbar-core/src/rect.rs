use serde::{Deserialize, Serialize};

/// A rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from its four edges (Win32 `RECT` layout).
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether either dimension is negative.
    ///
    /// The docking authority uses negative sizes to mean "leave the size
    /// alone and only move the window".
    pub fn has_negative_size(&self) -> bool {
        self.width < 0 || self.height < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_round_trip_through_from_edges() {
        let rect = Rect::from_edges(10, 20, 110, 70);

        assert_eq!(rect, Rect::new(10, 20, 100, 50));
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
    }

    #[test]
    fn negative_size_is_detected() {
        assert!(Rect::new(0, 0, -1, 40).has_negative_size());
        assert!(!Rect::new(0, 0, 1920, 40).has_negative_size());
    }
}
