//! Configuration loading and runtime mode detection.
//!
//! Two inputs feed a render timer's configuration: the per-instance
//! [`TimerOptions`] supplied by the caller, and an optional `render-timer.toml`
//! whose `[timing]` section provides process-wide defaults. The runtime mode
//! (development / production / test) is read once from the environment and
//! injected at construction so timer behavior stays deterministic in tests.
//!
//! Precedence when resolving: explicit option > file default > built-in default.
//! Unknown TOML fields are ignored so the file can grow without warnings.

use anyhow::Result;
use serde::Deserialize;
use std::{fmt, fs, path::PathBuf};
use tracing::warn;

mod options;

pub use options::{OptionsError, TimerConfig, TimerOptions};

/// Environment variable consulted by [`RuntimeMode::from_env`].
pub const MODE_ENV_VAR: &str = "RENDER_TIMER_ENV";

/// Process-wide runtime mode. Gates verbose per-render logging and the
/// default value of `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
    Test,
}

impl RuntimeMode {
    /// Parse a mode name. Unknown values fall back to `Production`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => RuntimeMode::Development,
            "test" => RuntimeMode::Test,
            _ => RuntimeMode::Production,
        }
    }

    /// Read the mode from `RENDER_TIMER_ENV`. Missing means production.
    pub fn from_env() -> Self {
        std::env::var(MODE_ENV_VAR)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    pub fn is_development(self) -> bool {
        matches!(self, RuntimeMode::Development)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuntimeMode::Development => "development",
            RuntimeMode::Production => "production",
            RuntimeMode::Test => "test",
        };
        f.write_str(name)
    }
}

/// `[timing]` section. Every field is optional; absent fields defer to the
/// built-in defaults applied in [`TimerOptions::resolve`].
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct TimingSection {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub log_to_console: Option<bool>,
    #[serde(default)]
    pub threshold_ms: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub timing: TimingSection,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

impl Config {
    /// File-level timing defaults.
    pub fn timing(&self) -> &TimingSection {
        &self.file.timing
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("render-timer.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("render-timer").join("render-timer.toml");
    }
    PathBuf::from("render-timer.toml")
}

/// Load configuration from `path` (or the discovered location). A missing
/// file yields defaults; an unparsable one yields defaults and a warning.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
        }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
