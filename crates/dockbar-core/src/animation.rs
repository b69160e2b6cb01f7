//! Auto-hide slide animation: timing contract, plans, and a frame driver.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::edge::{Edge, FlowDirection, Orientation};

/// Interval between animation frames while an animation is active.
pub const FRAME_MS: u64 = 16;

/// Delays and durations of the auto-hide animation.
///
/// These values are part of the bar's observable contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoHideTiming {
    /// Wait before retracting once hiding becomes allowed.
    pub delay_ms: u64,
    /// Wait before revealing once hiding stops being allowed.
    pub show_delay_ms: u64,
    /// Duration of the retract motion.
    pub hide_animation_ms: u64,
    /// Duration of the reveal motion.
    pub show_animation_ms: u64,
    /// Thickness left visible while hidden, in DPI-independent units.
    pub show_margin: f64,
}

impl Default for AutoHideTiming {
    fn default() -> Self {
        Self {
            delay_ms: 400,
            show_delay_ms: 0,
            hide_animation_ms: 300,
            show_animation_ms: 150,
            show_margin: 2.0,
        }
    }
}

/// Axis the content slides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A planned auto-hide motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoHideAnimation {
    pub hiding: bool,
    /// Target offset in DPI-independent units. Zero means fully shown.
    pub to: f64,
    /// Delay before the motion starts.
    pub begin_ms: u64,
    pub duration_ms: u64,
    pub axis: Axis,
}

impl AutoHideAnimation {
    /// Plans a hide or show motion for a bar.
    ///
    /// `immediate` drops the begin delay. The hidden offset is the
    /// thickness minus the reveal margin, negated for edges that retract
    /// toward the negative direction.
    pub fn plan(
        hiding: bool,
        immediate: bool,
        edge: Edge,
        flow: FlowDirection,
        thickness: f64,
        timing: &AutoHideTiming,
    ) -> Self {
        let mut to = 0.0;
        if hiding {
            to = thickness - timing.show_margin;
            if edge.hides_negative(flow) {
                to = -to;
            }
        }

        let begin_ms = match (immediate, hiding) {
            (true, _) => 0,
            (false, true) => timing.delay_ms,
            (false, false) => timing.show_delay_ms,
        };

        let duration_ms = if hiding {
            timing.hide_animation_ms
        } else {
            timing.show_animation_ms
        };

        let axis = match edge.orientation() {
            Orientation::Horizontal => Axis::Y,
            Orientation::Vertical => Axis::X,
        };

        Self {
            hiding,
            to,
            begin_ms,
            duration_ms,
            axis,
        }
    }
}

/// Something an animation did while being advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The motion actually started (its begin delay elapsed).
    Began { hiding: bool },
    /// The motion reached its target.
    Completed { hiding: bool },
}

#[derive(Debug, Clone, Copy)]
struct Running {
    plan: AutoHideAnimation,
    starts_at: u64,
    /// Captured when the motion begins, so a replacement animation
    /// continues from wherever the previous one left the content.
    from: Option<f64>,
}

/// Drives at most one auto-hide animation at a time.
#[derive(Debug, Clone)]
pub struct Animator {
    offset: f64,
    axis: Axis,
    running: Option<Running>,
}

impl Animator {
    pub fn new(axis: Axis) -> Self {
        Self {
            offset: 0.0,
            axis,
            running: None,
        }
    }

    /// Starts an animation, replacing any scheduled or running one.
    pub fn start(&mut self, plan: AutoHideAnimation, now: u64) {
        self.axis = plan.axis;
        self.running = Some(Running {
            plan,
            starts_at: now + plan.begin_ms,
            from: None,
        });
    }

    /// Drops any pending animation and snaps back to fully shown.
    pub fn reset(&mut self) {
        self.running = None;
        self.offset = 0.0;
    }

    /// Advances to `now`, updating the offset and reporting transitions.
    pub fn advance(&mut self, now: u64) -> Vec<AnimationEvent> {
        let mut events = Vec::new();
        let Some(run) = self.running.as_mut() else {
            return events;
        };
        if now < run.starts_at {
            return events;
        }

        let hiding = run.plan.hiding;
        let from = match run.from {
            Some(from) => from,
            None => {
                run.from = Some(self.offset);
                events.push(AnimationEvent::Began { hiding });
                self.offset
            }
        };

        let elapsed = now - run.starts_at;
        let progress = if run.plan.duration_ms == 0 {
            1.0
        } else {
            (elapsed as f64 / run.plan.duration_ms as f64).min(1.0)
        };

        let to = run.plan.to;
        if progress >= 1.0 {
            self.offset = to;
            self.running = None;
            events.push(AnimationEvent::Completed { hiding });
        } else {
            self.offset = from + (to - from) * ease_out_sine(progress);
        }

        events
    }

    /// Current offset in DPI-independent units.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Whether an animation is scheduled or in motion.
    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    /// Direction of the scheduled or running animation, if any.
    pub fn pending_direction(&self) -> Option<bool> {
        self.running.map(|run| run.plan.hiding)
    }

    /// When the animator next needs to be advanced.
    pub fn next_frame(&self, now: u64) -> Option<u64> {
        let run = self.running.as_ref()?;
        if now < run.starts_at {
            Some(run.starts_at)
        } else {
            Some(now + FRAME_MS)
        }
    }
}

/// Monotonic sine ease-out over `t` in `[0, 1]`.
pub fn ease_out_sine(t: f64) -> f64 {
    (t.clamp(0.0, 1.0) * FRAC_PI_2).sin()
}
