//! Command implementations for code-nav
//!
//! Each command owns its arguments, the request it maps to and the text
//! rendering of the plugin's reply.

pub mod find;
pub mod hierarchy;
pub mod overview;
pub mod refresh;
pub mod refs;
pub mod rename;
pub mod status;

use crate::error::UsageError;

/// Reject empty or whitespace-only positionals before anything is sent
pub(crate) fn require(
    command: &'static str,
    argument: &'static str,
    value: &str,
) -> Result<(), UsageError> {
    if value.trim().is_empty() {
        return Err(UsageError::BlankArgument { command, argument });
    }
    Ok(())
}
