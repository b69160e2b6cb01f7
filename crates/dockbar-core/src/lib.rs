pub mod animation;
pub mod authority;
pub mod bar;
pub mod config;
pub mod dpi;
pub mod edge;
pub mod effect;
pub mod fullscreen;
pub mod geometry;
pub mod ipc;
pub mod log;
pub mod message;
pub mod mode;
pub mod pid;
pub mod presence;
pub mod rect;
pub mod scheduler;
pub mod screen;

pub use animation::{AutoHideTiming, Axis};
pub use authority::{BarSize, DockingAuthority, Registration};
pub use bar::{Bar, BarContent, BarContext, BarOptions, CloseOutcome, ScreenChangeReason};
pub use config::Config;
pub use edge::{Edge, FlowDirection, Orientation};
pub use effect::Effect;
pub use fullscreen::{FullScreenApp, FullScreenRegistry, FullScreenTracker};
pub use ipc::{Command, PIPE_NAME, Response};
pub use message::{Dispatch, Message};
pub use mode::BarMode;
pub use presence::Signal;
pub use rect::Rect;
pub use scheduler::{Clock, ManualClock, MonotonicClock};
pub use screen::{DisplayTopology, Screen};

/// Result type used across the platform boundary.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;
