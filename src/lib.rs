//! code-nav - Direct CLI for the JetBrains Serena plugin
//!
//! Sends one HTTP request per invocation to the code-intelligence plugin
//! embedded in a JetBrains IDE and prints its reply, for shells and AI
//! coding agents.

pub mod app;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod plugin;
pub mod services;

pub use error::{CodeNavError, CodeNavResult};
