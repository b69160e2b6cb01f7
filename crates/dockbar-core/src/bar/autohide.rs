use crate::Effect;
use crate::animation::{AnimationEvent, AutoHideAnimation};
use crate::presence::{self, Signal};
use crate::scheduler::{Task, TaskHandle};
use crate::{BarMode, log_debug};

use super::Bar;

impl Bar {
    /// Whether the bar may retract right now.
    pub fn allow_auto_hide(&self) -> bool {
        presence::allow_auto_hide(self.mode, &self.presence, self.peek_active())
    }

    /// Whether a peek is holding the bar open.
    pub fn peek_active(&self) -> bool {
        self.peek.is_some_and(|h| self.scheduler.is_pending(h))
    }

    /// Updates one presence signal and reacts if that flips whether the
    /// bar may hide.
    pub fn set_presence(&mut self, signal: Signal, value: bool) -> Vec<Effect> {
        let before = self.allow_auto_hide();
        self.presence.set(signal, value);
        if self.allow_auto_hide() == before {
            return Vec::new();
        }
        self.auto_hide_changed()
    }

    /// A context menu is about to open at a client point. Only counts as
    /// presence when the content actually owns a menu there.
    pub fn context_menu_opening(&mut self, x: i32, y: i32) -> Vec<Effect> {
        let has_menu = self
            .content
            .as_ref()
            .is_some_and(|c| c.has_context_menu(x, y));
        if !has_menu {
            return Vec::new();
        }
        self.set_presence(Signal::ContextMenu, true)
    }

    /// A drop ends the drag just like leaving does.
    pub fn drop_received(&mut self) -> Vec<Effect> {
        self.set_presence(Signal::Drag, false)
    }

    /// Shows the bar right away and keeps it shown for `duration_ms`.
    ///
    /// A new peek replaces the previous one. Does nothing outside
    /// auto-hide mode.
    pub fn peek(&mut self, duration_ms: u64) -> Vec<Effect> {
        if self.mode != BarMode::AutoHide {
            return Vec::new();
        }

        if let Some(previous) = self.peek.take() {
            self.scheduler.cancel(previous);
        }

        log_debug!("Bar {}: peek for {duration_ms} ms", self.screen.device);
        let effects = self.animate_auto_hide(false, true);
        let now = self.now();
        self.peek = Some(self.scheduler.schedule(Task::PeekExpiry, now, duration_ms));
        effects
    }

    /// Turns the blur-behind effect on or off.
    ///
    /// Turning it on while the bar is auto-hidden records the request;
    /// the next completed show applies it.
    pub fn set_blur(&mut self, enable: bool) -> Vec<Effect> {
        if self.enable_blur == enable || self.handle.is_none() || !self.allows_transparency {
            return Vec::new();
        }

        self.enable_blur = enable;

        if enable && self.mode == BarMode::AutoHide && self.allow_auto_hide() {
            return Vec::new();
        }

        vec![Effect::SetBlur(enable)]
    }

    pub(super) fn peek_expired(&mut self, handle: TaskHandle) -> Vec<Effect> {
        if self.peek != Some(handle) {
            return Vec::new();
        }
        self.peek = None;

        if self.allow_auto_hide() {
            self.animate_auto_hide(true, true)
        } else {
            Vec::new()
        }
    }

    /// Reacts to a change of [`Bar::allow_auto_hide`].
    pub(super) fn auto_hide_changed(&mut self) -> Vec<Effect> {
        if self.is_opening {
            return Vec::new();
        }
        let hiding = self.allow_auto_hide();
        self.animate_auto_hide(hiding, false)
    }

    /// Starts a hide or show motion, replacing whatever was scheduled.
    pub(super) fn animate_auto_hide(&mut self, hiding: bool, immediate: bool) -> Vec<Effect> {
        if self.content.is_none() {
            return Vec::new();
        }
        if hiding && self.mode != BarMode::AutoHide {
            return Vec::new();
        }
        // Already fully shown and at rest.
        if !hiding && !self.animator.is_active() && self.animator.offset() == 0.0 {
            return Vec::new();
        }

        let plan = AutoHideAnimation::plan(
            hiding,
            immediate,
            self.edge,
            self.flow_direction,
            self.desired_thickness,
            &self.timing,
        );
        let now = self.now();
        self.animator.start(plan, now);
        self.pump_animation()
    }

    /// Advances the animator to now and turns its progress into effects.
    pub(super) fn pump_animation(&mut self) -> Vec<Effect> {
        let now = self.now();
        let events = self.animator.advance(now);
        let mut effects = Vec::new();

        for event in &events {
            if let AnimationEvent::Began { hiding } = *event {
                effects.extend(self.on_animation_begin(hiding));
            }
        }

        let offset = (self.animator.offset() * self.dpi_scale).round() as i32;
        if offset != self.rendered_offset {
            self.rendered_offset = offset;
            effects.push(Effect::Translate {
                axis: self.animator.axis(),
                offset,
            });
        }

        for event in &events {
            if let AnimationEvent::Completed { hiding } = *event {
                effects.extend(self.on_animation_complete(hiding));
            }
        }

        effects
    }

    fn on_animation_begin(&mut self, hiding: bool) -> Vec<Effect> {
        if hiding && self.blur_applicable() && self.allow_auto_hide() {
            return vec![Effect::SetBlur(false)];
        }
        Vec::new()
    }

    fn on_animation_complete(&mut self, hiding: bool) -> Vec<Effect> {
        if !hiding && self.blur_applicable() && !self.allow_auto_hide() {
            return vec![Effect::SetBlur(true)];
        }
        Vec::new()
    }

    fn blur_applicable(&self) -> bool {
        self.enable_blur && self.handle.is_some() && self.allows_transparency
    }
}
