use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/dockbar/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("dockbar"))
}

/// Returns the config file path: `~/.config/dockbar/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns the validated config, or a message describing what went
/// wrong. A missing file is reported as [`LoadError::Missing`].
pub fn try_load() -> Result<Config, LoadError> {
    let path = config_path().ok_or(LoadError::NoHome)?;
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(LoadError::Missing),
        Err(e) => return Err(LoadError::Invalid(format!("{}: {e}", path.display()))),
    };
    parse(&content).map_err(|e| LoadError::Invalid(format!("{}: {e}", path.display())))
}

/// Parses and validates config text.
pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; anything else is reported
/// on stderr first.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config,
        Err(LoadError::Missing) => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

/// Why the config file couldn't be used.
#[derive(Debug)]
pub enum LoadError {
    NoHome,
    Missing,
    Invalid(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHome => f.write_str("could not determine config path"),
            Self::Missing => f.write_str("config file not found"),
            Self::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for LoadError {}
