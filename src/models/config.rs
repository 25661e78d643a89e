//! Configuration model for code-nav

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// code-nav configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CodeNavConfig {
    #[serde(default)]
    pub plugin: PluginConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the IDE plugin listens and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginConfig {
    #[serde(default = "defaults::port")]
    pub port: u16,

    #[serde(default = "defaults::timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            port: defaults::port(),
            timeout_secs: defaults::timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Body lines shown per symbol before truncating
    #[serde(default = "defaults::body_lines")]
    pub body_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            body_lines: defaults::body_lines(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plugin payload passed through unchanged
    Json,
    /// Human-readable rendering
    #[default]
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown output format '{other}' (expected json or text)")),
        }
    }
}

mod defaults {
    /// Serena plugin's well-known port (0x5EA2)
    pub fn port() -> u16 {
        24226
    }
    pub fn timeout_secs() -> u64 {
        120
    }
    pub fn body_lines() -> usize {
        30
    }
}
