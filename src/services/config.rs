//! Configuration service for code-nav
//!
//! Layers built-in defaults, the global file, the project file and
//! environment overrides. CLI flags are applied last by the caller.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::config::CodeNavConfig;

pub const ENV_PORT: &str = "CODE_NAV_PORT";
pub const ENV_TIMEOUT: &str = "CODE_NAV_TIMEOUT";
pub const ENV_OUTPUT_FORMAT: &str = "CODE_NAV_OUTPUT_FORMAT";

pub trait ConfigService {
    fn load(&self) -> Result<CodeNavConfig, ConfigError>;
}

pub struct DefaultConfigService {
    root: PathBuf,
}

impl DefaultConfigService {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn global_config_path() -> PathBuf {
        // XDG standard: ~/.config/code-nav/config.toml
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("code-nav")
            .join("config.toml")
    }

    fn project_config_path(&self) -> PathBuf {
        self.root.join(".code-nav").join("config.toml")
    }
}

impl ConfigService for DefaultConfigService {
    fn load(&self) -> Result<CodeNavConfig, ConfigError> {
        let mut config = CodeNavConfig::default();
        if let Some(global) = load_layer(&Self::global_config_path())? {
            config = merge_layer(config, global);
        }
        if let Some(project) = load_layer(&self.project_config_path())? {
            config = merge_layer(config, project);
        }
        apply_env_overrides(config, |key| std::env::var(key).ok()).and_then(validate)
    }
}

/// A parsed config file, remembering which sections it actually defined
#[derive(Debug)]
pub struct ConfigLayer {
    config: CodeNavConfig,
    has_plugin: bool,
    has_output: bool,
}

pub fn load_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    parse_layer(&content, path).map(Some)
}

fn parse_layer(content: &str, path: &Path) -> Result<ConfigLayer, ConfigError> {
    let parse_err = |e: toml::de::Error| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.message().to_string(),
    };
    let table: toml::Table = toml::from_str(content).map_err(parse_err)?;
    let config: CodeNavConfig = toml::from_str(content).map_err(parse_err)?;

    tracing::debug!("Loaded config from {}", path.display());

    Ok(ConfigLayer {
        config,
        has_plugin: table.contains_key("plugin"),
        has_output: table.contains_key("output"),
    })
}

fn merge_layer(base: CodeNavConfig, layer: ConfigLayer) -> CodeNavConfig {
    CodeNavConfig {
        plugin: if layer.has_plugin {
            layer.config.plugin
        } else {
            base.plugin
        },
        output: if layer.has_output {
            layer.config.output
        } else {
            base.output
        },
    }
}

/// Apply `CODE_NAV_*` overrides read through `lookup`
pub fn apply_env_overrides<F>(mut config: CodeNavConfig, lookup: F) -> Result<CodeNavConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_PORT) {
        config.plugin.port = val.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: ENV_PORT.to_string(),
            message: format!("'{val}' is not a valid port"),
        })?;
    }
    if let Some(val) = lookup(ENV_TIMEOUT) {
        config.plugin.timeout_secs =
            val.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT.to_string(),
                message: format!("'{val}' is not a number of seconds"),
            })?;
    }
    if let Some(val) = lookup(ENV_OUTPUT_FORMAT) {
        config.output.format = val.parse().map_err(|message| ConfigError::InvalidValue {
            key: ENV_OUTPUT_FORMAT.to_string(),
            message,
        })?;
    }
    Ok(config)
}

/// Reject values that would make every request fail before reaching the plugin
pub fn validate(config: CodeNavConfig) -> Result<CodeNavConfig, ConfigError> {
    if config.plugin.port == 0 {
        return Err(ConfigError::InvalidValue {
            key: "plugin.port".to_string(),
            message: "port must be between 1 and 65535".to_string(),
        });
    }
    if config.plugin.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "plugin.timeout_secs".to_string(),
            message: "timeout must be at least 1 second".to_string(),
        });
    }
    Ok(config)
}
