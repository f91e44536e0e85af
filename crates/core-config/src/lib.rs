//! Configuration loading and parsing.
//!
//! Parses `fastbox.toml` (or an override path provided by the binary). Every
//! section and field is optional; unknown fields are ignored so older
//! binaries tolerate newer files. A file that fails to parse falls back to
//! defaults rather than refusing to start the editor; the failure is kept on
//! the returned `Config` and logged by `report` once logging is up, since the
//! log file location is itself configured here.
//!
//! ```toml
//! [input]
//! escape_timeout_ms = 10
//! [terminal]
//! set_title = true
//! [log]
//! file = "fastbox.log"
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "fastbox.toml";

/// Upper bound for the ESC disambiguation wait. Anything longer makes a
/// plain Escape feel sluggish.
pub const MAX_ESCAPE_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: Self::default_escape_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_escape_timeout_ms() -> u64 {
        10
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TerminalConfig {
    #[serde(default = "TerminalConfig::default_set_title")]
    pub set_title: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            set_title: Self::default_set_title(),
        }
    }
}

impl TerminalConfig {
    const fn default_set_title() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
        }
    }
}

impl LogConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("fastbox.log")
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File the values came from; `None` when defaults are in effect.
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
    /// Set when a config file existed but could not be parsed.
    pub parse_error: Option<ParseFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub message: String,
}

impl Config {
    /// Log what loading found. Call after the subscriber is installed.
    pub fn report(&self) {
        match (&self.parse_error, &self.path) {
            (Some(failure), _) => warn!(
                target: "config",
                path = %failure.path.display(),
                error = %failure.message,
                "config_parse_failed"
            ),
            (None, Some(path)) => info!(target: "config", path = %path.display(), "config_loaded"),
            (None, None) => info!(target: "config", "config_defaults"),
        }
    }

    /// ESC disambiguation wait, clamped to `MAX_ESCAPE_TIMEOUT_MS`.
    pub fn escape_timeout(&self) -> Duration {
        let raw = self.file.input.escape_timeout_ms;
        let clamped = raw.min(MAX_ESCAPE_TIMEOUT_MS);
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max = MAX_ESCAPE_TIMEOUT_MS,
                "escape_timeout_clamped"
            );
        }
        Duration::from_millis(clamped)
    }
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("fastbox").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            path: Some(path),
            file,
            parse_error: None,
        }),
        Err(e) => Ok(Config {
            parse_error: Some(ParseFailure {
                path,
                message: e.to_string(),
            }),
            ..Config::default()
        }),
    }
}
