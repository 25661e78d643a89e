//! Type hierarchy commands (supertypes, subtypes)

use clap::Args;

use super::require;
use crate::cli::render::format_hierarchy;
use crate::error::{CodeNavResult, UsageError};
use crate::models::symbol::HierarchyPayload;
use crate::plugin::{PluginRequest, routes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Supertypes,
    Subtypes,
}

impl Direction {
    pub fn command(self) -> &'static str {
        match self {
            Self::Supertypes => "supertypes",
            Self::Subtypes => "subtypes",
        }
    }

    fn route(self) -> &'static str {
        match self {
            Self::Supertypes => routes::SUPERTYPES,
            Self::Subtypes => routes::SUBTYPES,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Supertypes => "Supertypes",
            Self::Subtypes => "Subtypes",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct HierarchyArgs {
    /// Class, interface or trait name
    pub name: String,

    /// File declaring the symbol, when the name is ambiguous
    #[arg(short, long)]
    pub path: Option<String>,

    /// Maximum traversal depth
    #[arg(short, long)]
    pub depth: Option<u32>,
}

impl HierarchyArgs {
    pub fn request(&self, direction: Direction) -> Result<PluginRequest, UsageError> {
        require(direction.command(), "name", &self.name)?;
        Ok(PluginRequest::get(direction.route())
            .param("name", self.name.as_str())
            .param_opt("path", self.path.as_deref())
            .param_opt("depth", self.depth))
    }

    pub fn render(&self, direction: Direction, body: &[u8]) -> CodeNavResult<String> {
        let payload: HierarchyPayload = serde_json::from_slice(body)?;
        if payload.hierarchy.is_empty() {
            return Ok(format!(
                "No {} found for: {}",
                direction.command(),
                self.name
            ));
        }

        let name = payload
            .symbol
            .as_ref()
            .map(|s| s.name_path.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name);
        Ok(format!(
            "{} of {}:\n\n{}",
            direction.title(),
            name,
            format_hierarchy(&payload.hierarchy, 0)
        ))
    }
}
