// Error types for the reporting engine

use std::path::PathBuf;
use thiserror::Error;

/// Lifecycle callback received out of state order.
///
/// These are usage errors: the caller drove the listener incorrectly and the
/// listener cannot recover on its behalf.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("suite '{running}' is already running; cannot start '{requested}'")]
    SuiteAlreadyStarted { running: String, requested: String },

    #[error("no suite is running; '{event}' received before suite start")]
    SuiteNotStarted { event: &'static str },

    #[error("suite '{suite}' already finished; '{event}' rejected")]
    SuiteAlreadyFinished { suite: String, event: &'static str },

    #[error("suite finish for '{requested}' does not match running suite '{running}'")]
    SuiteNameMismatch { running: String, requested: String },
}

/// Failure persisting a rendered report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create report directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config")]
    Parse(#[from] toml::de::Error),
}
