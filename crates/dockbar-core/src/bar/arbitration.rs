use crate::{Effect, log_debug};

use super::Bar;

impl Bar {
    /// Reacts to a change in the full-screen registry.
    ///
    /// Concedes topmost while any full-screen app covers this bar's
    /// screen (or the whole virtual desktop) and takes it back once none
    /// does. Changes that don't affect this screen produce nothing.
    pub fn on_full_screen_changed(&mut self) -> Vec<Effect> {
        if self.handle.is_none() || self.is_closing {
            return Vec::new();
        }

        let covered = self
            .ctx
            .full_screen
            .entries()
            .iter()
            .any(|app| app.device == self.screen.device || app.spans_virtual_screen);

        if covered && self.topmost {
            log_debug!(
                "Bar on {}: conceding to full-screen app",
                self.screen.device
            );
            self.topmost = false;
            vec![Effect::Concede]
        } else if !covered && !self.topmost {
            log_debug!("Bar on {}: returning to normal state", self.screen.device);
            self.raising = true;
            self.topmost = true;
            vec![Effect::Raise]
        } else {
            Vec::new()
        }
    }

    /// Clears the raising flag once the host has applied [`Effect::Raise`].
    pub fn end_raise(&mut self) {
        self.raising = false;
    }
}
