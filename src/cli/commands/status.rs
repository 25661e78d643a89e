//! Status command - plugin health check

use clap::Args;

use crate::error::{CodeNavResult, UsageError};
use crate::models::symbol::StatusPayload;
use crate::plugin::{PluginRequest, routes};

#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {}

impl StatusArgs {
    pub fn request(&self) -> Result<PluginRequest, UsageError> {
        Ok(PluginRequest::get(routes::STATUS))
    }

    pub fn render(&self, body: &[u8], base_url: &str) -> CodeNavResult<String> {
        let status: StatusPayload = serde_json::from_slice(body)?;
        Ok(format!(
            "Connected to JetBrains plugin at {}\nProject root: {}",
            base_url,
            status.project_root.as_deref().unwrap_or("?")
        ))
    }
}
