use std::fmt;

use serde::{Deserialize, Serialize};

/// How the bar occupies its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    /// Reserves its edge space with the docking authority.
    #[default]
    Docked,
    /// Retracts off-screen until a presence signal or peek shows it.
    AutoHide,
    /// Neither reserves space nor auto-hides.
    Floating,
}

impl BarMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docked => "docked",
            Self::AutoHide => "autohide",
            Self::Floating => "floating",
        }
    }
}

impl fmt::Display for BarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
