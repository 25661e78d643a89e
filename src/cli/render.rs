//! Text rendering of plugin payloads

use crate::models::symbol::{HierarchyItem, Symbol};

const KIND_WIDTH: usize = 12;
const NAME_WIDTH: usize = 40;
const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_body: bool,
    /// Child levels to show below each listed symbol; `None` shows all
    pub max_depth: Option<u32>,
    pub body_lines: usize,
}

impl RenderOptions {
    pub fn new(body_lines: usize) -> Self {
        Self {
            show_body: false,
            max_depth: None,
            body_lines,
        }
    }

    pub fn with_body(mut self, show: bool) -> Self {
        self.show_body = show;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<u32>) -> Self {
        self.max_depth = depth;
        self
    }
}

/// `header`, a blank line, then each symbol followed by a blank line
pub fn symbol_list(header: &str, symbols: &[Symbol], opts: RenderOptions) -> String {
    let mut out = format!("{header}\n\n");
    for symbol in symbols {
        out.push_str(&format_symbol(symbol, 0, opts));
        out.push_str("\n\n");
    }
    out
}

pub fn format_symbol(symbol: &Symbol, indent: usize, opts: RenderOptions) -> String {
    let prefix = "  ".repeat(indent);
    let head = format!(
        "{prefix}{:<KIND_WIDTH$} {:<NAME_WIDTH$} {}",
        symbol.kind(),
        symbol.name(),
        symbol.location()
    );
    let mut lines = vec![head.trim_end().to_string()];

    if opts.show_body
        && let Some(body) = symbol.body.as_deref()
    {
        let rule = format!("{prefix}{}", "─".repeat(RULE_WIDTH));
        lines.push(rule.clone());
        lines.extend(
            body.lines()
                .take(opts.body_lines)
                .map(|l| format!("{prefix}  {l}").trim_end().to_string()),
        );
        if body.lines().count() > opts.body_lines {
            lines.push(format!("{prefix}  ... (truncated)"));
        }
        lines.push(rule);
    }

    let descend = opts.max_depth.is_none_or(|max| (indent as u32) < max);
    if descend {
        for child in &symbol.children {
            lines.push(format_symbol(child, indent + 1, opts));
        }
    }

    lines.join("\n")
}

pub fn format_hierarchy(items: &[HierarchyItem], indent: usize) -> String {
    let prefix = "  ".repeat(indent);
    let mut lines = Vec::new();
    for item in items {
        let sym = &item.symbol;
        let line = format!(
            "{prefix}{:<KIND_WIDTH$} {:<NAME_WIDTH$} {}",
            sym.kind(),
            sym.name_path,
            sym.relative_path
        );
        lines.push(line.trim_end().to_string());
        if !item.children.is_empty() {
            lines.push(format_hierarchy(&item.children, indent + 1));
        }
    }
    lines.join("\n")
}
