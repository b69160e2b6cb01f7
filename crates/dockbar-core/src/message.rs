//! Native window messages the bar reacts to.

use crate::effect::Effect;

pub const WM_ACTIVATE: u32 = 0x0006;
pub const WM_WINDOWPOSCHANGING: u32 = 0x0046;
pub const WM_WINDOWPOSCHANGED: u32 = 0x0047;
pub const WM_DISPLAYCHANGE: u32 = 0x007E;
pub const WM_DEVICECHANGE: u32 = 0x0219;
pub const WM_DPICHANGED: u32 = 0x02E0;
pub const WM_DWMCOMPOSITIONCHANGED: u32 = 0x031E;

/// `WM_DEVICECHANGE` subtype sent when the hardware configuration changed.
pub const DBT_DEVNODES_CHANGED: usize = 0x0007;

/// `ABN_POSCHANGED`: the authority wants bars to re-report their size.
pub const ABN_POSCHANGED: usize = 0x1;
/// `ABN_WINDOWARRANGE`: windows are being tiled or cascaded.
pub const ABN_WINDOWARRANGE: usize = 0x3;

/// A decoded window message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Activate,
    /// The window is about to move. `preserves_z_order` is true when the
    /// pending change carries `SWP_NOZORDER`.
    WindowPosChanging { preserves_z_order: bool },
    WindowPosChanged,
    /// DPI changed; `dpi` is the new horizontal DPI.
    DpiChanged { dpi: u32 },
    DisplayChange,
    DeviceChange { event: usize },
    CompositionChanged,
    /// Anything else, including the authority's registered callback id.
    Other { id: u32, wparam: usize, lparam: isize },
}

impl Message {
    /// Decodes a raw message.
    ///
    /// `WM_WINDOWPOSCHANGING` carries a pointer to a `WINDOWPOS`; the host
    /// reads its flags and builds [`Message::WindowPosChanging`] itself.
    /// Passed here, it decodes as a change that keeps z-order.
    pub fn decode(id: u32, wparam: usize, lparam: isize) -> Self {
        match id {
            WM_ACTIVATE => Self::Activate,
            WM_WINDOWPOSCHANGING => Self::WindowPosChanging {
                preserves_z_order: true,
            },
            WM_WINDOWPOSCHANGED => Self::WindowPosChanged,
            WM_DPICHANGED => Self::DpiChanged {
                dpi: (wparam & 0xFFFF) as u32,
            },
            WM_DISPLAYCHANGE => Self::DisplayChange,
            WM_DEVICECHANGE => Self::DeviceChange { event: wparam },
            WM_DWMCOMPOSITIONCHANGED => Self::CompositionChanged,
            _ => Self::Other { id, wparam, lparam },
        }
    }
}

/// A notification delivered through the authority's callback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppBarNotification {
    PositionChanged,
    /// `beginning` is true before windows are arranged, false after.
    WindowArrange { beginning: bool },
    Other(usize),
}

impl AppBarNotification {
    pub fn decode(wparam: usize, lparam: isize) -> Self {
        match wparam {
            ABN_POSCHANGED => Self::PositionChanged,
            ABN_WINDOWARRANGE => Self::WindowArrange {
                beginning: lparam != 0,
            },
            other => Self::Other(other),
        }
    }
}

/// Result of routing one message through a bar.
#[derive(Debug, Default, PartialEq)]
pub struct Dispatch {
    /// The host must not forward the message to the default procedure.
    pub handled: bool,
    /// The host must rewrite the pending `WINDOWPOS` to insert the window
    /// at the topmost position.
    pub force_topmost: bool,
    pub effects: Vec<Effect>,
}

impl Dispatch {
    pub fn unhandled() -> Self {
        Self::default()
    }

    pub fn handled(effects: Vec<Effect>) -> Self {
        Self {
            handled: true,
            force_topmost: false,
            effects,
        }
    }

    pub fn pass(effects: Vec<Effect>) -> Self {
        Self {
            handled: false,
            force_topmost: false,
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpi_is_read_from_low_word() {
        let wparam = (144 << 16) | 144;
        assert_eq!(
            Message::decode(WM_DPICHANGED, wparam, 0),
            Message::DpiChanged { dpi: 144 }
        );
    }

    #[test]
    fn unknown_ids_are_preserved() {
        assert_eq!(
            Message::decode(0xC123, 1, 1),
            Message::Other {
                id: 0xC123,
                wparam: 1,
                lparam: 1
            }
        );
    }

    #[test]
    fn window_arrange_reads_phase_from_lparam() {
        assert_eq!(
            AppBarNotification::decode(ABN_WINDOWARRANGE, 1),
            AppBarNotification::WindowArrange { beginning: true }
        );
        assert_eq!(
            AppBarNotification::decode(ABN_WINDOWARRANGE, 0),
            AppBarNotification::WindowArrange { beginning: false }
        );
        assert_eq!(
            AppBarNotification::decode(ABN_POSCHANGED, 0),
            AppBarNotification::PositionChanged
        );
    }
}
