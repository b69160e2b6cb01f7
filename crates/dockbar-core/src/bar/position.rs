use crate::geometry::{self, Placement};
use crate::scheduler::Task;
use crate::{BarMode, Effect, Rect, log_debug};

use super::Bar;

/// Delay before repositioning or re-applying an assigned rectangle.
/// The window system tends to override the first attempt.
pub(super) const REPOSITION_DELAY_MS: u64 = 100;

impl Bar {
    /// Places the bar with the geometry resolver.
    ///
    /// When running as the shell, also publishes the usable desktop
    /// area for other windows.
    pub fn set_position(&mut self) -> Vec<Effect> {
        let Some(handle) = self.handle else {
            return Vec::new();
        };

        let edge_offset = if self.requires_screen_edge {
            0.0
        } else {
            self.ctx
                .authority
                .edge_reserved_thickness(handle, self.edge, &self.screen)
        };

        let rect = geometry::resolve(&Placement {
            bounds: self.screen.bounds,
            edge: self.edge,
            thickness: self.desired_thickness,
            dpi_scale: self.dpi_scale,
            edge_offset,
        });

        if self.ctx.running_as_shell {
            if self.ctx.authority.contains(handle) {
                self.ctx.authority.resize_bar(&self.registration(handle));
            }
            self.ctx.authority.set_usable_desktop_area(&self.screen);
        }

        vec![Effect::move_to(rect)]
    }

    /// Repositions after a screen change.
    ///
    /// Docked bars of a regular app let the authority assign the
    /// position; every other case re-runs the resolver after a delay.
    pub fn set_screen_position(&mut self) -> Vec<Effect> {
        if self.ctx.running_as_shell || self.mode != BarMode::Docked {
            self.schedule_delayed_position();
            return Vec::new();
        }
        self.request_position()
    }

    /// Records a rectangle assigned by the authority and schedules a
    /// re-application when it moved.
    pub fn after_position(&mut self, rect: Rect) -> Vec<Effect> {
        let same = self.last_assigned == Some(rect);
        self.last_assigned = Some(rect);
        if !same {
            let now = self.now();
            self.scheduler
                .replace(Task::CorrectivePosition, now, REPOSITION_DELAY_MS);
        }
        Vec::new()
    }

    /// Asks the authority for a position and applies what it assigns.
    pub(super) fn request_position(&mut self) -> Vec<Effect> {
        let Some(handle) = self.handle else {
            return Vec::new();
        };
        let rect = self.ctx.authority.set_position(&self.registration(handle));
        let mut effects = vec![Effect::move_to(rect)];
        effects.extend(self.after_position(rect));
        effects
    }

    pub(super) fn schedule_delayed_position(&mut self) {
        let now = self.now();
        self.scheduler
            .replace(Task::DelayedPosition, now, REPOSITION_DELAY_MS);
    }

    /// Re-applies the most recent assignment, read at fire time.
    pub(super) fn reapply_assigned(&mut self) -> Vec<Effect> {
        match self.last_assigned {
            Some(rect) => {
                log_debug!(
                    "Bar {}: re-applying assigned rect ({},{} {}x{})",
                    self.screen.device,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height
                );
                vec![Effect::move_to(rect)]
            }
            None => Vec::new(),
        }
    }
}
