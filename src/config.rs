//! Configuration file support
//!
//! Loads settings from ~/.xaviedit.toml (or %USERPROFILE%\.xaviedit.toml on Windows)
//!
//! Example:
//! ```toml
//! # XaviEdit configuration
//! line-numbers = true
//! tab-width = 4
//! crlf-on-save = true
//! log-level = "info"
//! ```

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{EditorError, Result};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Whether to show the line-number gutter
    pub line_numbers: bool,
    /// Spaces inserted by the Tab key
    pub tab_width: usize,
    /// Convert LF to CRLF when writing files
    pub crlf_on_save: bool,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_numbers: true,
            tab_width: 4,
            crlf_on_save: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".xaviedit.toml"))
    }

    /// Load configuration from file
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error the caller reports before falling back.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Config::default());
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(EditorError::from_io(path, e)),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(contents).map_err(|e| EditorError::Config(e.to_string()))?;
        config.tab_width = config.tab_width.clamp(1, 16);
        Ok(config)
    }

    /// Spaces inserted by the Tab key
    pub fn indent(&self) -> String {
        " ".repeat(self.tab_width)
    }
}

/// User home directory, honouring the platform's variable
pub fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var_os("USERPROFILE").map(PathBuf::from)
    }

    #[cfg(not(windows))]
    {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
line-numbers = false
tab-width = 2
crlf-on-save = false
log-level = "debug"
        "#;

        let config = Config::parse(contents).unwrap();
        assert!(!config.line_numbers);
        assert_eq!(config.tab_width, 2);
        assert!(!config.crlf_on_save);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::parse("tab-width = 8").unwrap();
        assert_eq!(config.tab_width, 8);
        assert!(config.line_numbers);
        assert!(config.crlf_on_save);
        assert_eq!(config.log_level, "info");

        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_tab_width_clamped() {
        assert_eq!(Config::parse("tab-width = 0").unwrap().tab_width, 1);
        assert_eq!(Config::parse("tab-width = 99").unwrap().tab_width, 16);
    }

    #[test]
    fn test_malformed_config() {
        let err = Config::parse("tab-width = \"wide\"").unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = Config::parse("theme = \"dark\"\nline-numbers = false").unwrap();
        assert!(!config.line_numbers);
        assert_eq!(config.tab_width, Config::default().tab_width);
    }

    #[test]
    fn test_indent() {
        let config = Config::default();
        assert_eq!(config.indent(), "    ");
    }
}
