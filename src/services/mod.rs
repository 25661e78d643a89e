//! Service layer for code-nav

pub mod config;

pub use config::{ConfigService, DefaultConfigService};
