//! Find command - symbol lookup by name

use clap::Args;

use super::require;
use crate::cli::OutputContext;
use crate::cli::render::{RenderOptions, symbol_list};
use crate::error::{CodeNavResult, UsageError};
use crate::models::symbol::SymbolsPayload;
use crate::plugin::{PluginRequest, routes};

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Symbol name or name path (e.g. "UserService", "UserService/findById")
    pub name: String,

    /// Restrict the search to one file
    #[arg(short, long)]
    pub path: Option<String>,

    /// Include symbol body (source code)
    #[arg(short, long)]
    pub body: bool,

    /// Include nested symbols up to depth (0 = none, 1 = direct members)
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Also search dependencies (vendor, node_modules, libraries)
    #[arg(long)]
    pub deps: bool,
}

impl FindArgs {
    pub fn request(&self) -> Result<PluginRequest, UsageError> {
        require("find", "name", &self.name)?;
        Ok(PluginRequest::get(routes::FIND)
            .param("name", self.name.as_str())
            .param_opt("path", self.path.as_deref())
            .flag("body", self.body)
            .param_opt("depth", self.depth)
            .flag("deps", self.deps))
    }

    pub fn render(&self, body: &[u8], ctx: &OutputContext) -> CodeNavResult<String> {
        let payload: SymbolsPayload = serde_json::from_slice(body)?;
        if payload.symbols.is_empty() {
            return Ok(format!("No symbols found for: {}", self.name));
        }

        let opts = RenderOptions::new(ctx.body_lines())
            .with_body(self.body)
            .with_max_depth(self.depth);
        Ok(symbol_list(
            &format!("Found {} symbol(s):", payload.symbols.len()),
            &payload.symbols,
            opts,
        ))
    }
}
