//! CLI module for code-nav
//!
//! Provides command-line interface using clap derive macros.

pub mod commands;
pub mod output;
pub mod render;

pub use output::OutputContext;

use std::ffi::OsString;

use clap::{Parser, Subcommand};

use crate::error::UsageError;
use crate::models::config::{CodeNavConfig, OutputFormat};
use commands::{
    find::FindArgs, hierarchy::HierarchyArgs, overview::OverviewArgs, refresh::RefreshArgs,
    refs::RefsArgs, rename::RenameArgs, status::StatusArgs,
};

const LONG_ABOUT: &str = r#"
code-nav - Direct CLI for the JetBrains Serena plugin

Talks HTTP to the plugin running inside your IDE (127.0.0.1:24226 by default)
for symbol lookup, reference search and rename refactoring. The IDE must be
running with the plugin enabled and a project open.

EXAMPLES:
  code-nav status
  code-nav find UserService --depth 1
  code-nav find UserService/findById --body
  code-nav refs UserService
  code-nav supertypes ArrayList
  code-nav overview src/main/kotlin/App.kt
  code-nav rename OldClass NewClass
  code-nav --format json find UserService     # raw plugin payload

EXIT CODES:
  0 success, 1 internal error, 2 usage error,
  3 plugin unreachable, 4 plugin reported an error
"#;

/// code-nav - Direct CLI for the JetBrains Serena plugin
#[derive(Parser, Debug)]
#[command(name = "code-nav")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
#[command(after_help = "Use 'code-nav <COMMAND> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (default from config: output.format)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Plugin port on 127.0.0.1 (default from config: plugin.port)
    #[arg(long, global = true, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Request timeout in seconds (default from config: plugin.timeout_secs)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Verbose output (show debug info)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Parse an argument vector without exiting the process
    pub fn parse_args<I, T>(args: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| {
            if e.use_stderr() {
                ParseError::Usage(UsageError::from_clap(&e))
            } else {
                ParseError::Display(e)
            }
        })
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: CodeNavConfig) -> CodeNavConfig {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(port) = self.port {
            config.plugin.port = port;
        }
        if let Some(timeout) = self.timeout {
            config.plugin.timeout_secs = timeout;
        }
        config
    }
}

#[derive(Debug)]
pub enum ParseError {
    /// `--help` / `--version`: print and exit successfully
    Display(clap::Error),
    Usage(UsageError),
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check the plugin connection
    Status(StatusArgs),

    /// Find symbols by name
    Find(FindArgs),

    /// Find references to a symbol
    Refs(RefsArgs),

    /// Parent classes, interfaces and traits
    Supertypes(HierarchyArgs),

    /// Subclasses and implementations
    Subtypes(HierarchyArgs),

    /// Rename a symbol across the project (IDE refactoring)
    Rename(RenameArgs),

    /// Show the symbol structure of a file
    Overview(OverviewArgs),

    /// Make the IDE reload a file from disk
    Refresh(RefreshArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Find(_) => "find",
            Self::Refs(_) => "refs",
            Self::Supertypes(_) => "supertypes",
            Self::Subtypes(_) => "subtypes",
            Self::Rename(_) => "rename",
            Self::Overview(_) => "overview",
            Self::Refresh(_) => "refresh",
        }
    }
}
