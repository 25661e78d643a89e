//! Error types for code-nav

use std::time::Duration;

use thiserror::Error;

pub type CodeNavResult<T> = std::result::Result<T, CodeNavError>;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_CONNECTION: i32 = 3;
pub const EXIT_PLUGIN: i32 = 4;

const IDE_HINT: &str = "Make sure your IDE is running with the Serena plugin.";

#[derive(Debug, Error)]
pub enum CodeNavError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid response from plugin: {0}")]
    InvalidResponse(serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CodeNavError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err)
    }
}

impl CodeNavError {
    /// Process exit status for this failure kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => EXIT_USAGE,
            Self::Connection(_) => EXIT_CONNECTION,
            Self::Plugin(_) => EXIT_PLUGIN,
            Self::Config(_) | Self::InvalidResponse(_) | Self::Io(_) => EXIT_ERROR,
        }
    }
}

/// Bad command-line input, detected before any request is made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("{0}")]
    Invalid(String),

    #[error("'{command}' requires a non-empty <{argument}>")]
    BlankArgument {
        command: &'static str,
        argument: &'static str,
    },
}

impl UsageError {
    /// Collapse a clap rejection into a single diagnostic line
    pub fn from_clap(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let line = rendered
            .lines()
            .map(str::trim)
            .take_while(|l| !l.starts_with("Usage:") && !l.starts_with("For more information"))
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let line = line.strip_prefix("error: ").unwrap_or(&line);
        if line.is_empty() {
            Self::Invalid("invalid arguments".to_string())
        } else {
            Self::Invalid(line.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Cannot connect to JetBrains plugin at {url}. {}", IDE_HINT)]
    Refused { url: String },

    #[error("JetBrains plugin at {url} did not respond within {:?}. {}", .timeout, IDE_HINT)]
    Timeout { url: String, timeout: Duration },

    #[error("Request to JetBrains plugin at {url} failed: {message}. {}", IDE_HINT)]
    Failed { url: String, message: String },

    #[error("Failed to create HTTP client: {0}")]
    Setup(String),
}

/// The plugin answered, but with a failure status
///
/// The command name is kept for callers; the top level prefixes it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("plugin returned HTTP {status}: {message}")]
pub struct PluginError {
    pub command: String,
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
