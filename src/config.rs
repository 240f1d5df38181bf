// Configuration file handling

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory that receives HTML reports
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Title shown in the HTML header and footer
    #[serde(default = "default_title")]
    pub title: String,

    /// Emit per-event lines and the summary report to the log
    #[serde(default = "default_enabled")]
    pub console: bool,

    /// Write the HTML report at suite end
    #[serde(default = "default_enabled")]
    pub html: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            title: default_title(),
            console: default_enabled(),
            html: default_enabled(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

// Default values
pub const ENV_REPORTS_DIR: &str = "APIREPORT_REPORTS_DIR";
pub const CONFIG_FILE_NAME: &str = "apireport.toml";

pub fn default_reports_dir() -> PathBuf {
    PathBuf::from("target/api-test-reports")
}

pub fn default_title() -> String {
    String::from("API Test Suite")
}

fn default_enabled() -> bool {
    true
}

fn default_filter() -> String {
    String::from("info")
}

impl Config {
    /// Load configuration from default locations, falling back to defaults.
    ///
    /// Locations, first match wins:
    /// 1. ./apireport.toml
    /// 2. ~/.apireport.toml
    ///
    /// `APIREPORT_REPORTS_DIR` overrides the reports directory either way.
    pub fn load() -> Result<Self, ConfigError> {
        let mut candidates = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(format!(".{}", CONFIG_FILE_NAME)));
        }

        let mut config = Self::load_first(&candidates)?;
        config.apply_env(std::env::var(ENV_REPORTS_DIR).ok());
        Ok(config)
    }

    /// Load the first candidate that exists as a file, or defaults if none does
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    fn apply_env(&mut self, reports_dir: Option<String>) {
        if let Some(dir) = reports_dir.filter(|d| !d.trim().is_empty()) {
            self.report.reports_dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[report]
reports_dir = "out/reports"
title = "Petstore API"
console = false
html = true

[logging]
filter = "apireport=debug"
"#;

        let config = Config::parse(toml).expect("Failed to parse config");
        assert_eq!(config.report.reports_dir, PathBuf::from("out/reports"));
        assert_eq!(config.report.title, "Petstore API");
        assert!(!config.report.console);
        assert!(config.report.html);
        assert_eq!(config.logging.filter, "apireport=debug");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = Config::parse("[report]\ntitle = \"Smoke\"\n").expect("parse");
        assert_eq!(config.report.title, "Smoke");
        assert_eq!(config.report.reports_dir, default_reports_dir());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = Config::parse("[report]\nhtml = \"yes please\"\n").expect_err("invalid type");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env(Some("/tmp/reports".into()));
        assert_eq!(config.report.reports_dir, PathBuf::from("/tmp/reports"));

        config.apply_env(Some("  ".into()));
        assert_eq!(config.report.reports_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config::default();
        let parsed = Config::parse(&config.to_toml()).expect("parse generated toml");
        assert_eq!(parsed.report.title, config.report.title);
    }
}
