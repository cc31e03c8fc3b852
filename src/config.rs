use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cross_xdg::BaseDirs;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::tape::DEFAULT_TAPE_SIZE;

/// File name looked up under the XDG config home.
pub const CONFIG_FILE: &str = "bf.toml";

/// Explicit config path; overrides the XDG lookup.
pub const ENV_CONFIG: &str = "BF_CONFIG";
pub const ENV_TAPE_SIZE: &str = "BF_TAPE_SIZE";
pub const ENV_REPL_MODE: &str = "BF_REPL_MODE";

/// Runtime configuration, read from `bf.toml` and then the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tape: TapeSection,
    pub repl: ReplSection,
    pub colors: ColorSection,
}

/// The `[tape]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TapeSection {
    /// Number of cells (default: 256).
    pub size: usize,
}

impl Default for TapeSection {
    fn default() -> Self {
        Self { size: DEFAULT_TAPE_SIZE }
    }
}

/// The `[repl]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplSection {
    pub mode: ModeSetting,
    /// Print the startup banner when stderr is a TTY.
    pub banner: bool,
    /// In-memory history entries kept by the line editor.
    pub history_size: usize,
}

impl Default for ReplSection {
    fn default() -> Self {
        Self {
            mode: ModeSetting::Auto,
            banner: true,
            history_size: 1_000,
        }
    }
}

/// Requested REPL mode before TTY detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    #[default]
    Auto,
    Bare,
    Editor,
}

impl FromStr for ModeSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ModeSetting::Auto),
            "bare" => Ok(ModeSetting::Bare),
            "editor" => Ok(ModeSetting::Editor),
            _ => Err(ConfigError::Invalid {
                field: "repl.mode",
                reason: format!("{s:?}, must be 'auto', 'bare' or 'editor'"),
            }),
        }
    }
}

/// The `[colors]` section: highlight colors for the line editor.
///
/// Values are `"#RRGGBB"` or a color name; unset keys keep the theme default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorSection {
    pub increment: Option<String>,
    pub decrement: Option<String>,
    pub right: Option<String>,
    pub left: Option<String>,
    pub output: Option<String>,
    pub input: Option<String>,
    pub block: Option<String>,
    pub comment: Option<String>,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match env::var_os(ENV_CONFIG) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => match default_path() {
                Some(path) => Self::from_file_if_exists(&path)?,
                None => Self::default(),
            },
        };
        config.with_env(|key| env::var(key).ok())
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;
        Self::from_str(&content, path)
    }

    fn from_file_if_exists(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse config text. `path` is only used in error messages.
    pub fn from_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BF_TAPE_SIZE` and `BF_REPL_MODE` as returned by `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_TAPE_SIZE) {
            self.tape.size = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                field: "tape.size",
                reason: format!("{ENV_TAPE_SIZE}={raw:?} is not a number"),
            })?;
        }
        if let Some(raw) = lookup(ENV_REPL_MODE) {
            self.repl.mode = raw.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tape.size == 0 {
            return Err(ConfigError::Invalid {
                field: "tape.size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.repl.history_size == 0 {
            return Err(ConfigError::Invalid {
                field: "repl.history_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/bf.toml`, or `None` if no home directory resolves.
fn default_path() -> Option<PathBuf> {
    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let mut path = BaseDirs::new()
        .into_iter()
        .map(|dirs| PathBuf::from(dirs.config_home()))
        .next()?;
    path.push(CONFIG_FILE);
    Some(path)
}
