use crate::{Effect, log_info};

use super::Bar;

/// Why the screen setup is being re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenChangeReason {
    DpiChange,
    DisplayChange,
    DeviceChange,
    CompositionChange,
}

impl Bar {
    /// Re-evaluates screen setup after a topology, device, DPI, or
    /// composition change.
    ///
    /// Only the bar on the primary screen reacts, unless the change is a
    /// DPI change: those reach only the window whose monitor changed, so
    /// every bar handles its own. Nothing happens while closing.
    pub fn process_screen_change(&mut self, reason: ScreenChangeReason) -> Vec<Effect> {
        if self.allow_close || self.is_closing {
            return Vec::new();
        }

        let owns_change = self.screen.primary && self.process_screen_changes;
        if !owns_change && reason != ScreenChangeReason::DpiChange {
            return Vec::new();
        }

        log_info!(
            "Bar {}: processing screen change ({reason:?})",
            self.screen.device
        );
        self.set_screen_properties(reason)
    }

    fn set_screen_properties(&mut self, reason: ScreenChangeReason) -> Vec<Effect> {
        self.ctx.full_screen.notify_screens_changed();

        if self.screen.primary
            && reason != ScreenChangeReason::DpiChange
            && let Some(primary) = self.ctx.displays.primary_screen()
        {
            self.screen = primary;
        }

        self.set_screen_position()
    }
}
