use crate::{BarMode, Effect, log_info, log_warn};

use super::Bar;

/// What the host should do with a close request.
#[derive(Debug, Clone, PartialEq)]
pub enum CloseOutcome {
    /// The bar released its registrations; destroy the window.
    Closed,
    /// Closing isn't allowed yet; cancel the close and keep the window.
    Vetoed,
    /// A close is already in progress.
    AlreadyClosing,
}

impl Bar {
    /// Adopts the native window and runs the opening sequence.
    ///
    /// `initial_scale` is the window's scale at creation time. The
    /// primary bar publishes it as the process-wide nominal scale, then
    /// every bar starts from the nominal scale and corrects itself when
    /// the window system reports its real DPI.
    pub fn open(&mut self, handle: usize, initial_scale: f64) -> Vec<Effect> {
        if self.handle.is_some() {
            return Vec::new();
        }
        self.handle = Some(handle);

        if self.screen.primary {
            self.ctx.nominal_scale.set(initial_scale);
        }
        self.dpi_scale = self.ctx.nominal_scale.get();

        let mut effects = self.set_position();

        if self.ctx.running_as_shell {
            self.schedule_delayed_position();
        }

        match self.mode {
            BarMode::Docked => effects.extend(self.register_app_bar()),
            BarMode::AutoHide => self.register_auto_hide(),
            BarMode::Floating => {}
        }

        effects.push(Effect::HideFromTasks);
        self.ctx.full_screen.subscribe(handle);

        self.is_opening = false;
        effects.extend(self.auto_hide_changed());
        effects
    }

    /// Allows or forbids the next close request.
    pub fn set_allow_close(&mut self, allow: bool) {
        self.allow_close = allow;
    }

    /// Handles a close request.
    ///
    /// The content's closing hook always runs. If closing is allowed the
    /// bar leaves the docking authority, the auto-hide registry, and the
    /// full-screen notifications; otherwise the close is vetoed.
    pub fn request_close(&mut self) -> CloseOutcome {
        if self.is_closing {
            return CloseOutcome::AlreadyClosing;
        }
        self.is_closing = true;

        if let Some(content) = self.content.as_mut() {
            content.closing();
        }

        if !self.allow_close {
            self.is_closing = false;
            log_warn!("Bar {}: close vetoed", self.screen.device);
            return CloseOutcome::Vetoed;
        }

        self.unregister_app_bar();
        self.unregister_auto_hide();
        if let Some(handle) = self.handle {
            self.ctx.full_screen.unsubscribe(handle);
        }

        self.scheduler.clear();
        self.peek = None;
        self.animator.reset();

        log_info!("Bar {}: closed", self.screen.device);
        CloseOutcome::Closed
    }
}
