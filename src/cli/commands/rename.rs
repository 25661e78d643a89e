//! Rename command - IDE refactoring across the project
//!
//! The only command that changes the user's project. The request is built
//! once and sent once; a failure is reported, never replayed.

use clap::Args;

use super::require;
use crate::error::UsageError;
use crate::plugin::{PluginRequest, routes};

#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Symbol to rename
    pub old: String,

    /// New name for the symbol
    pub new: String,

    /// File declaring the symbol, when the name is ambiguous
    #[arg(short, long)]
    pub path: Option<String>,

    /// Also rename occurrences in comments
    #[arg(short, long)]
    pub comments: bool,

    /// Also rename occurrences in strings and text
    #[arg(short, long)]
    pub text: bool,
}

impl RenameArgs {
    pub fn request(&self) -> Result<PluginRequest, UsageError> {
        require("rename", "old", &self.old)?;
        require("rename", "new", &self.new)?;
        Ok(PluginRequest::post(routes::RENAME)
            .param("old", self.old.as_str())
            .param("new", self.new.as_str())
            .param_opt("path", self.path.as_deref())
            .flag("comments", self.comments)
            .flag("text", self.text))
    }

    pub fn render(&self) -> String {
        format!("Renamed {} -> {}", self.old, self.new)
    }
}
