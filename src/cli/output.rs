//! Output formatting for CLI commands

use std::io::{self, Write};

use crate::models::config::{OutputConfig, OutputFormat};

/// Output context for consistent formatting across commands
///
/// Commands render into a `String`; this context decides the shape and
/// owns the final write to stdout.
#[derive(Debug, Clone)]
pub struct OutputContext {
    format: OutputFormat,
    body_lines: usize,
}

impl OutputContext {
    pub fn new(format: OutputFormat, body_lines: usize) -> Self {
        Self { format, body_lines }
    }

    /// JSON mode passes plugin payloads through untouched
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn body_lines(&self) -> usize {
        self.body_lines
    }

    /// Print a rendered result to stdout
    pub fn print(&self, rendered: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write_terminated(&mut stdout, rendered)?;
        stdout.flush()
    }
}

impl From<&OutputConfig> for OutputContext {
    fn from(config: &OutputConfig) -> Self {
        Self::new(config.format, config.body_lines)
    }
}

/// Write `bytes` unchanged, adding a final newline only when missing
fn write_terminated<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    out.write_all(bytes)?;
    if !bytes.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Fold a possibly multi-line message onto a single line
pub fn diagnostic_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
