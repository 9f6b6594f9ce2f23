//! Builder-based command framework with subcommands, permission and
//! sender-kind gates, and rule-driven tab completion.

pub mod builder;
pub mod context;
pub mod error;
pub mod messages;
pub mod registry;
pub mod tab;

pub use builder::{Command, CommandBuilder, SubcommandBuilder};
pub use context::CommandContext;
pub use error::{fail, success, CommandError, CommandResult};
pub use registry::CommandRegistry;
pub use tab::{TabCompleter, TabCompleterBuilder, TabContext};

/// Starts building a command.
pub fn command(name: impl Into<String>) -> CommandBuilder {
    CommandBuilder::new(name)
}

/// Starts building a subcommand.
pub fn subcommand(name: impl Into<String>) -> SubcommandBuilder {
    SubcommandBuilder::new(name)
}

/// Starts building a tab completer.
pub fn tab() -> TabCompleterBuilder {
    TabCompleter::builder()
}
