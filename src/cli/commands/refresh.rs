//! Refresh command - make the IDE reload a file from disk

use clap::Args;

use super::require;
use crate::error::UsageError;
use crate::plugin::{PluginRequest, routes};

#[derive(Args, Debug, Clone)]
pub struct RefreshArgs {
    /// File path to refresh
    pub path: String,
}

impl RefreshArgs {
    pub fn request(&self) -> Result<PluginRequest, UsageError> {
        require("refresh", "path", &self.path)?;
        Ok(PluginRequest::post(routes::REFRESH).param("path", self.path.as_str()))
    }

    pub fn render(&self) -> String {
        format!("Refreshed: {}", self.path)
    }
}
