use crate::dpi::scale_from_dpi;
use crate::message::{AppBarNotification, DBT_DEVNODES_CHANGED, Dispatch, Message};
use crate::{BarMode, Effect};

use super::{Bar, ScreenChangeReason};

impl Bar {
    /// Routes one native message. Anything not listed passes through.
    pub fn dispatch(&mut self, message: Message) -> Dispatch {
        match message {
            Message::Other { id, wparam, lparam } if self.callback_id == Some(id) => {
                Dispatch::handled(self.on_app_bar_notification(AppBarNotification::decode(
                    wparam, lparam,
                )))
            }
            Message::Activate => {
                if self.should_notify_authority()
                    && let Some(handle) = self.handle
                {
                    self.ctx.authority.activate(handle);
                }
                Dispatch::unhandled()
            }
            Message::WindowPosChanging { preserves_z_order } => Dispatch {
                handled: false,
                force_topmost: self.raising && !preserves_z_order,
                effects: Vec::new(),
            },
            Message::WindowPosChanged => {
                if self.should_notify_authority()
                    && let Some(handle) = self.handle
                {
                    self.ctx.authority.window_pos_changed(handle);
                }
                Dispatch::unhandled()
            }
            Message::DpiChanged { dpi } => Dispatch::pass(self.on_dpi_changed(dpi)),
            Message::DisplayChange => {
                Dispatch::handled(self.process_screen_change(ScreenChangeReason::DisplayChange))
            }
            Message::DeviceChange { event } if event == DBT_DEVNODES_CHANGED => {
                Dispatch::handled(self.process_screen_change(ScreenChangeReason::DeviceChange))
            }
            Message::CompositionChanged => Dispatch::handled(
                self.process_screen_change(ScreenChangeReason::CompositionChange),
            ),
            _ => Dispatch::unhandled(),
        }
    }

    fn on_app_bar_notification(&mut self, notification: AppBarNotification) -> Vec<Effect> {
        match notification {
            AppBarNotification::PositionChanged => self.request_position(),
            AppBarNotification::WindowArrange { beginning } => {
                self.visible = !beginning;
                vec![Effect::SetVisible(!beginning)]
            }
            AppBarNotification::Other(_) => Vec::new(),
        }
    }

    fn on_dpi_changed(&mut self, dpi: u32) -> Vec<Effect> {
        self.dpi_scale = scale_from_dpi(dpi);

        if self.screen.primary {
            self.ctx.nominal_scale.set(self.dpi_scale);
        }

        // While opening docked, the opening sequence positions the bar
        // with the new scale itself.
        if self.is_opening && self.mode == BarMode::Docked {
            return Vec::new();
        }
        self.process_screen_change(ScreenChangeReason::DpiChange)
    }

    fn should_notify_authority(&self) -> bool {
        self.mode == BarMode::Docked && !self.ctx.running_as_shell && !self.allow_close
    }
}
