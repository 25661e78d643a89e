//! Overview command - symbol outline of one file

use clap::Args;

use super::require;
use crate::cli::OutputContext;
use crate::cli::render::{RenderOptions, symbol_list};
use crate::error::{CodeNavResult, UsageError};
use crate::models::symbol::SymbolsPayload;
use crate::plugin::{PluginRequest, routes};

#[derive(Args, Debug, Clone)]
pub struct OverviewArgs {
    /// File path, relative to the project root
    pub path: String,

    /// Symbol hierarchy depth
    #[arg(short, long)]
    pub depth: Option<u32>,
}

impl OverviewArgs {
    pub fn request(&self) -> Result<PluginRequest, UsageError> {
        require("overview", "path", &self.path)?;
        Ok(PluginRequest::get(routes::OVERVIEW)
            .param("path", self.path.as_str())
            .param_opt("depth", self.depth))
    }

    pub fn render(&self, body: &[u8], ctx: &OutputContext) -> CodeNavResult<String> {
        let payload: SymbolsPayload = serde_json::from_slice(body)?;
        if payload.symbols.is_empty() {
            return Ok(format!("No symbols in: {}", self.path));
        }

        Ok(symbol_list(
            &format!("Symbols in {}:", self.path),
            &payload.symbols,
            RenderOptions::new(ctx.body_lines()).with_max_depth(self.depth),
        ))
    }
}
