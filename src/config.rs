use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::MinifyError;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Location of the user overlay, before tilde expansion.
const USER_CONFIG_PATH: &str = "~/.config/shminify/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub passes: PassesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    /// Re-emit a leading `#!` line verbatim.
    #[serde(default)]
    pub keep_shebang: bool,
    /// Append `\n` to non-empty output when writing it out.
    #[serde(default)]
    pub trailing_newline: bool,
}

/// Switches for the optional trailing passes.
#[derive(Debug, Deserialize, Serialize)]
pub struct PassesConfig {
    #[serde(default = "enabled")]
    pub flatten_newlines: bool,
    #[serde(default = "enabled")]
    pub tighten_operators: bool,
}

impl Default for PassesConfig {
    fn default() -> Self {
        Self {
            flatten_newlines: true,
            tighten_operators: true,
        }
    }
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// Also append records to the log file under `~/.local/share/shminify`.
    #[serde(default)]
    pub file: bool,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    passes: PassesOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    keep_shebang: Option<bool>,
    trailing_newline: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct PassesOverlay {
    flatten_newlines: Option<bool>,
    tighten_operators: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<LogLevel>,
    file: Option<bool>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Embedded defaults, merged with `~/.config/shminify/config.toml` if it
    /// exists. A broken user file is reported and ignored.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        let path = user_config_path();
        if !path.exists() {
            return config;
        }
        match read_overlay(&path) {
            Ok(overlay) => config.apply_overlay(overlay),
            // runs before logging::init, so a log macro here would be dropped
            Err(e) => eprintln!("shminify: ignoring user config: {e}"),
        }
        config
    }

    /// Embedded defaults merged with an explicitly requested file. Unlike
    /// [`Config::load`], a missing or malformed file is an error.
    pub fn load_from(path: &str) -> Result<Self, MinifyError> {
        let path = PathBuf::from(shellexpand::tilde(path).as_ref());
        let overlay = read_overlay(&path)?;
        let mut config = Self::default_config();
        config.apply_overlay(overlay);
        Ok(config)
    }

    /// Apply an overlay on top of this config. Present values override.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.keep_shebang {
            self.settings.keep_shebang = v;
        }
        if let Some(v) = s.trailing_newline {
            self.settings.trailing_newline = v;
        }

        let p = overlay.passes;
        if let Some(v) = p.flatten_newlines {
            self.passes.flatten_newlines = v;
        }
        if let Some(v) = p.tighten_operators {
            self.passes.tighten_operators = v;
        }

        let l = overlay.logging;
        if let Some(v) = l.level {
            self.logging.level = v;
        }
        if let Some(v) = l.file {
            self.logging.file = v;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

fn user_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(USER_CONFIG_PATH).as_ref())
}

fn read_overlay(path: &Path) -> Result<ConfigOverlay, MinifyError> {
    let content = std::fs::read_to_string(path).map_err(|source| MinifyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| MinifyError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert!(!config.settings.keep_shebang);
        assert!(!config.settings.trailing_newline);
        assert!(config.passes.flatten_newlines);
        assert!(config.passes.tighten_operators);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(!config.logging.file);
    }

    #[test]
    fn overlay_overrides_scalars() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            keep_shebang = true

            [logging]
            level = "debug"
        "#,
        );
        assert!(config.settings.keep_shebang);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.to_filter(), LevelFilter::Debug);
    }

    #[test]
    fn overlay_omitted_values_unchanged() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [passes]
            tighten_operators = false
        "#,
        );
        assert!(!config.passes.tighten_operators);
        assert!(config.passes.flatten_newlines);
        assert!(!config.settings.trailing_newline);
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert!(config.passes.flatten_newlines);
        assert!(config.passes.tighten_operators);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.passes.flatten_newlines);
        assert!(!config.settings.keep_shebang);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result: Result<ConfigOverlay, _> = toml::from_str("[logging]\nlevel = \"loud\"");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_reports_missing_file() {
        let err = Config::load_from("/nonexistent/shminify/config.toml").unwrap_err();
        assert!(matches!(err, MinifyError::Io { .. }));
    }

    #[test]
    fn load_from_reads_overlay_file() {
        let dir = std::env::temp_dir().join(format!("shminify-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[settings]\ntrailing_newline = true\n").unwrap();

        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert!(config.settings.trailing_newline);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
