mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

pub use loader::{config_dir, config_path, load, try_load};

use crate::animation::AutoHideTiming;
use crate::bar::BarOptions;
use crate::edge::{Edge, FlowDirection};
use crate::log::LogConfig;
use crate::BarMode;

/// Top-level configuration for dockbar.
///
/// Loaded from `~/.config/dockbar/config.toml`. Missing sections fall
/// back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placement and appearance of the bar.
    pub bar: BarSettings,
    /// Auto-hide delays and durations.
    pub auto_hide: AutoHideTiming,
    /// File logging.
    pub logging: LogConfig,
    /// Shell-replacement behaviour.
    pub shell: ShellConfig,
}

/// `[bar]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarSettings {
    /// Screen edge the bar docks to.
    pub edge: Edge,
    /// "docked", "autohide", or "floating".
    pub mode: BarMode,
    /// Bar thickness in DPI-independent pixels.
    pub thickness: f64,
    /// Always touch the physical edge, ignoring other bars on it.
    pub requires_screen_edge: bool,
    /// Blur the desktop behind the bar.
    pub blur: bool,
    /// Whether the bar window may be transparent. Blur needs this.
    pub allows_transparency: bool,
    /// "ltr" or "rtl". Decides which side vertical bars retract toward.
    pub flow_direction: FlowDirection,
    /// Background color as hex (e.g. "#1e1e2e").
    pub background: String,
    /// How long `dockbar peek` keeps an auto-hidden bar visible.
    pub peek_ms: u64,
}

/// `[shell]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Set when dockbar replaces Explorer as the desktop shell. The bar
    /// then positions itself and publishes the desktop work area.
    pub running_as_shell: bool,
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            edge: Edge::Bottom,
            mode: BarMode::Docked,
            thickness: 40.0,
            requires_screen_edge: false,
            blur: false,
            allows_transparency: true,
            flow_direction: FlowDirection::LeftToRight,
            background: "#1e1e2e".into(),
            peek_ms: 1000,
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// Keeps the bar visible and thick enough to grab, the reveal margin
    /// inside the bar, and animations short enough to feel responsive.
    pub fn validate(&mut self) {
        if !self.bar.thickness.is_finite() {
            self.bar.thickness = BarSettings::default().thickness;
        }
        if !self.auto_hide.show_margin.is_finite() {
            self.auto_hide.show_margin = AutoHideTiming::default().show_margin;
        }

        self.bar.thickness = self.bar.thickness.clamp(8.0, 400.0);
        self.bar.peek_ms = self.bar.peek_ms.clamp(100, 60_000);
        if parse_hex_color(&self.bar.background).is_none() {
            self.bar.background = BarSettings::default().background;
        }

        let t = &mut self.auto_hide;
        t.delay_ms = t.delay_ms.min(10_000);
        t.show_delay_ms = t.show_delay_ms.min(10_000);
        t.hide_animation_ms = t.hide_animation_ms.min(5_000);
        t.show_animation_ms = t.show_animation_ms.min(5_000);
        t.show_margin = t.show_margin.clamp(0.0, self.bar.thickness);
    }

    /// Bar options derived from this config.
    pub fn bar_options(&self) -> BarOptions {
        BarOptions {
            edge: self.bar.edge,
            mode: self.bar.mode,
            thickness: self.bar.thickness,
            requires_screen_edge: self.bar.requires_screen_edge,
            allows_transparency: self.bar.allows_transparency,
            flow_direction: self.bar.flow_direction,
            timing: self.auto_hide,
        }
    }
}

/// Parses `#rrggbb` into its components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
