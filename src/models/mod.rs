//! Data models for code-nav

pub mod config;
pub mod symbol;

pub use config::{CodeNavConfig, OutputConfig, OutputFormat, PluginConfig};
pub use symbol::{HierarchyItem, Symbol};
