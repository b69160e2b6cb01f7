//! Win32 host for dockbar.
//!
//! Everything here talks to the window system and only builds on
//! Windows. The bar logic itself lives in `dockbar-core`.

/// Shell AppBar registration (`SHAppBarMessage`).
#[cfg(windows)]
pub mod appbar;

/// Daemon main loop.
#[cfg(windows)]
pub mod daemon;

/// Per-monitor DPI helpers.
#[cfg(windows)]
pub mod dpi;

/// Foreground full-screen detection.
#[cfg(windows)]
pub mod fullscreen;

/// Bar windows and their window procedure.
#[cfg(windows)]
pub mod host;

/// IPC via Named Pipes.
#[cfg(windows)]
pub mod ipc;

/// Monitor enumeration.
#[cfg(windows)]
pub mod monitor;

/// Process utilities (alive check, kill).
#[cfg(windows)]
pub mod process;

/// Raw window operations used to apply bar effects.
#[cfg(windows)]
pub mod window;
