use serde::{Deserialize, Serialize};

/// The screen side a bar is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// Layout direction of a bar, derived from its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Reading direction of the bar content.
///
/// Mirrors which side vertical bars retract toward: in a right-to-left
/// layout the Right edge is the "leading" one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowDirection {
    #[default]
    #[serde(rename = "ltr")]
    LeftToRight,
    #[serde(rename = "rtl")]
    RightToLeft,
}

impl Edge {
    /// Vertical iff the bar sits on the Left or Right edge.
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Vertical,
            Self::Top | Self::Bottom => Orientation::Horizontal,
        }
    }

    /// Whether the auto-hide offset for this edge points in the negative
    /// direction (up for Top, toward the leading side for vertical bars).
    pub fn hides_negative(self, flow: FlowDirection) -> bool {
        let leading = match flow {
            FlowDirection::LeftToRight => Self::Left,
            FlowDirection::RightToLeft => Self::Right,
        };
        self == Self::Top || self == leading
    }

    /// Win32 `ABE_*` value for this edge.
    pub fn abe(self) -> u32 {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_edges_are_vertical() {
        assert_eq!(Edge::Left.orientation(), Orientation::Vertical);
        assert_eq!(Edge::Right.orientation(), Orientation::Vertical);
        assert_eq!(Edge::Top.orientation(), Orientation::Horizontal);
        assert_eq!(Edge::Bottom.orientation(), Orientation::Horizontal);
    }

    #[test]
    fn hide_direction_follows_flow() {
        let ltr = FlowDirection::LeftToRight;
        let rtl = FlowDirection::RightToLeft;

        assert!(Edge::Top.hides_negative(ltr));
        assert!(Edge::Left.hides_negative(ltr));
        assert!(!Edge::Right.hides_negative(ltr));
        assert!(!Edge::Bottom.hides_negative(ltr));

        assert!(Edge::Top.hides_negative(rtl));
        assert!(Edge::Right.hides_negative(rtl));
        assert!(!Edge::Left.hides_negative(rtl));
    }
}
