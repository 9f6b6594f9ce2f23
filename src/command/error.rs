use crate::lang::{self, Placeholder};
use thiserror::Error;

/// Failure of a command executor.
///
/// `Message` is rendered to the sender as-is; `Internal` is logged and the
/// sender gets a generic error message.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CommandError {
    pub fn message(template: &str, placeholders: &[Placeholder]) -> Self {
        CommandError::Message(lang::render(template, placeholders))
    }
}

pub type CommandResult = std::result::Result<(), CommandError>;

pub fn success() -> CommandResult {
    Ok(())
}

/// Fails the command with a message rendered to the sender.
pub fn fail(template: &str, placeholders: &[Placeholder]) -> CommandResult {
    Err(CommandError::message(template, placeholders))
}
