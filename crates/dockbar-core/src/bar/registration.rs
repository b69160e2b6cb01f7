use crate::{BarMode, Effect, log_info};

use super::Bar;

impl Bar {
    /// Switches mode.
    ///
    /// The docking registration changes first, then the auto-hide
    /// registration, then any motion that implies.
    pub fn set_mode(&mut self, mode: BarMode) -> Vec<Effect> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;

        if self.is_opening {
            return Vec::new();
        }

        let mut effects = if mode == BarMode::Docked {
            self.register_app_bar()
        } else {
            self.unregister_app_bar();
            Vec::new()
        };

        if mode == BarMode::AutoHide {
            self.register_auto_hide();
            effects.extend(self.auto_hide_changed());
        } else {
            self.unregister_auto_hide();
            if let Some(peek) = self.peek.take() {
                self.scheduler.cancel(peek);
            }
            effects.extend(self.animate_auto_hide(false, true));
        }
        effects
    }

    /// Whether the docking authority currently manages this bar.
    pub fn is_registered(&self) -> bool {
        self.handle
            .is_some_and(|handle| self.ctx.authority.contains(handle))
    }

    /// Reserves the edge with the authority, then takes the position it
    /// assigns. When running as the shell there is nobody to negotiate
    /// with and the resolver's placement stands.
    pub(super) fn register_app_bar(&mut self) -> Vec<Effect> {
        let Some(handle) = self.handle else {
            return Vec::new();
        };
        if self.mode != BarMode::Docked || self.ctx.authority.contains(handle) {
            return Vec::new();
        }

        let id = self.ctx.authority.register_bar(&self.registration(handle));
        self.callback_id = Some(id);
        log_info!(
            "Bar {}: docked on {} edge (callback 0x{id:X})",
            self.screen.device,
            self.edge.as_str()
        );

        if self.ctx.running_as_shell {
            return Vec::new();
        }
        self.request_position()
    }

    pub(super) fn unregister_app_bar(&mut self) {
        let Some(handle) = self.handle else {
            return;
        };
        if !self.ctx.authority.contains(handle) {
            return;
        }

        self.ctx.authority.unregister_bar(handle, self.bar_size());
        log_info!("Bar {}: released {} edge", self.screen.device, self.edge.as_str());
    }

    pub(super) fn register_auto_hide(&mut self) {
        if let Some(handle) = self.handle {
            self.ctx
                .authority
                .register_auto_hide_bar(handle, self.edge, &self.screen);
        }
    }

    pub(super) fn unregister_auto_hide(&mut self) {
        if let Some(handle) = self.handle {
            self.ctx
                .authority
                .unregister_auto_hide_bar(handle, self.edge, &self.screen);
        }
    }
}
