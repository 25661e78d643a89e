//! Refs command - usage search

use clap::Args;

use super::require;
use crate::cli::OutputContext;
use crate::cli::render::{RenderOptions, symbol_list};
use crate::error::{CodeNavResult, UsageError};
use crate::models::symbol::SymbolsPayload;
use crate::plugin::{PluginRequest, routes};

#[derive(Args, Debug, Clone)]
pub struct RefsArgs {
    /// Symbol to find references to
    pub name: String,

    /// File declaring the symbol, when the name is ambiguous
    #[arg(short, long)]
    pub path: Option<String>,
}

impl RefsArgs {
    pub fn request(&self) -> Result<PluginRequest, UsageError> {
        require("refs", "name", &self.name)?;
        Ok(PluginRequest::get(routes::REFS)
            .param("name", self.name.as_str())
            .param_opt("path", self.path.as_deref()))
    }

    pub fn render(&self, body: &[u8], ctx: &OutputContext) -> CodeNavResult<String> {
        let payload: SymbolsPayload = serde_json::from_slice(body)?;
        if payload.symbols.is_empty() {
            return Ok(format!("No references found for: {}", self.name));
        }

        Ok(symbol_list(
            &format!(
                "Found {} reference(s) to {}:",
                payload.symbols.len(),
                self.name
            ),
            &payload.symbols,
            RenderOptions::new(ctx.body_lines()),
        ))
    }
}
