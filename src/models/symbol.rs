//! Symbol model definitions
//!
//! Wire types for symbols as reported by the JetBrains plugin. Only decoded
//! for text rendering; JSON output passes the plugin payload through untouched.

use serde::Deserialize;

/// A code symbol from the IDE index
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    #[serde(default)]
    pub name_path: String,
    #[serde(default)]
    pub relative_path: String,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text_range: Option<TextRange>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub children: Vec<Symbol>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    #[serde(default)]
    pub start_pos: Option<Position>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub line: Option<u32>,
}

impl Symbol {
    /// Short name: last segment of the name path
    pub fn name(&self) -> &str {
        self.name_path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("?")
    }

    /// Symbol kind; `type` wins over `kind` when the plugin sends both
    pub fn kind(&self) -> &str {
        self.type_name
            .as_deref()
            .or(self.kind.as_deref())
            .unwrap_or("?")
    }

    /// 1-based start line, if the plugin reported a usable one
    pub fn line(&self) -> Option<u32> {
        self.text_range
            .as_ref()
            .and_then(|r| r.start_pos)
            .and_then(|p| p.line)
            .filter(|l| *l > 0)
            .or(self.line.filter(|l| *l > 0))
    }

    /// `path:line`, or just the path when no line is known
    pub fn location(&self) -> String {
        match self.line() {
            Some(line) => format!("{}:{}", self.relative_path, line),
            None => self.relative_path.clone(),
        }
    }
}

/// One node of a supertype/subtype tree
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HierarchyItem {
    #[serde(default)]
    pub symbol: Symbol,
    #[serde(default)]
    pub children: Vec<HierarchyItem>,
}

/// Payload of `find`, `refs` and `overview`
#[derive(Debug, Default, Deserialize)]
pub struct SymbolsPayload {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

/// Payload of `supertypes` and `subtypes`
#[derive(Debug, Default, Deserialize)]
pub struct HierarchyPayload {
    #[serde(default)]
    pub symbol: Option<Symbol>,
    #[serde(default)]
    pub hierarchy: Vec<HierarchyItem>,
}

/// Payload of `status`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    #[serde(default)]
    pub project_root: Option<String>,
}
