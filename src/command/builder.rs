use crate::command::context::CommandContext;
use crate::command::error::CommandResult;
use crate::command::tab::TabCompleter;
use crate::utils::error::Result;
use crate::utils::validation;
use std::collections::HashMap;

pub(crate) type Executor = Box<dyn Fn(&CommandContext) -> CommandResult + Send + Sync>;

/// A built command, ready to be registered with a
/// [`CommandRegistry`](crate::command::registry::CommandRegistry).
pub struct Command {
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) permission: Option<String>,
    pub(crate) player_only: bool,
    pub(crate) console_only: bool,
    pub(crate) description: Option<String>,
    pub(crate) usage: Option<String>,
    pub(crate) no_permission_message: Option<String>,
    pub(crate) players_only_message: Option<String>,
    pub(crate) console_only_message: Option<String>,
    pub(crate) invalid_usage_message: Option<String>,
    pub(crate) executor: Option<Executor>,
    pub(crate) completer: Option<TabCompleter>,
    pub(crate) subcommands: Vec<Subcommand>,
    pub(crate) subcommand_lookup: HashMap<String, usize>,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub(crate) fn find_subcommand(&self, input: &str) -> Option<&Subcommand> {
        let index = *self.subcommand_lookup.get(&input.to_lowercase())?;
        self.subcommands.get(index)
    }
}

pub(crate) struct Subcommand {
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) permission: Option<String>,
    pub(crate) player_only: bool,
    pub(crate) console_only: bool,
    pub(crate) usage: Option<String>,
    pub(crate) invalid_usage_message: Option<String>,
    pub(crate) executor: Executor,
    pub(crate) completer: Option<TabCompleter>,
}

/// Fluent builder for a command with optional subcommands.
pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    permission: Option<String>,
    player_only: bool,
    console_only: bool,
    description: Option<String>,
    usage: Option<String>,
    no_permission_message: Option<String>,
    players_only_message: Option<String>,
    console_only_message: Option<String>,
    invalid_usage_message: Option<String>,
    executor: Option<Executor>,
    completer: Option<TabCompleter>,
    subcommands: Vec<Subcommand>,
}

impl CommandBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            permission: None,
            player_only: false,
            console_only: false,
            description: None,
            usage: None,
            no_permission_message: None,
            players_only_message: None,
            console_only_message: None,
            invalid_usage_message: None,
            executor: None,
            completer: None,
            subcommands: Vec::new(),
        }
    }

    pub fn aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permission = Some(node.into());
        self
    }

    pub fn player_only(mut self) -> Self {
        self.player_only = true;
        self.console_only = false;
        self
    }

    pub fn console_only(mut self) -> Self {
        self.console_only = true;
        self.player_only = false;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn no_permission_message(mut self, message: impl Into<String>) -> Self {
        self.no_permission_message = Some(message.into());
        self
    }

    pub fn players_only_message(mut self, message: impl Into<String>) -> Self {
        self.players_only_message = Some(message.into());
        self
    }

    pub fn console_only_message(mut self, message: impl Into<String>) -> Self {
        self.console_only_message = Some(message.into());
        self
    }

    pub fn invalid_usage_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_usage_message = Some(message.into());
        self
    }

    /// Executor that cannot fail.
    pub fn exec(self, executor: impl Fn(&CommandContext) + Send + Sync + 'static) -> Self {
        self.exec_result(move |ctx| {
            executor(ctx);
            Ok(())
        })
    }

    /// Executor returning a [`CommandResult`].
    pub fn exec_result(
        mut self,
        executor: impl Fn(&CommandContext) -> CommandResult + Send + Sync + 'static,
    ) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn tab(mut self, completer: TabCompleter) -> Self {
        self.completer = Some(completer);
        self
    }

    pub fn subcommand(mut self, builder: SubcommandBuilder) -> Result<Self> {
        self.subcommands.push(builder.build()?);
        Ok(self)
    }

    pub fn build(self) -> Result<Command> {
        validation::not_blank("command name", &self.name)?;
        validation::require(
            self.executor.is_some() || !self.subcommands.is_empty(),
            &format!("no executor or subcommands registered for /{}", self.name),
        )?;

        let mut lookup = HashMap::new();
        for (index, subcommand) in self.subcommands.iter().enumerate() {
            lookup.insert(subcommand.name.to_lowercase(), index);
            for alias in &subcommand.aliases {
                lookup.insert(alias.to_lowercase(), index);
            }
        }

        Ok(Command {
            name: self.name,
            aliases: self.aliases,
            permission: self.permission,
            player_only: self.player_only,
            console_only: self.console_only,
            description: self.description,
            usage: self.usage,
            no_permission_message: self.no_permission_message,
            players_only_message: self.players_only_message,
            console_only_message: self.console_only_message,
            invalid_usage_message: self.invalid_usage_message,
            executor: self.executor,
            completer: self.completer,
            subcommands: self.subcommands,
            subcommand_lookup: lookup,
        })
    }
}

/// Fluent builder for a single subcommand.
pub struct SubcommandBuilder {
    name: String,
    aliases: Vec<String>,
    permission: Option<String>,
    player_only: bool,
    console_only: bool,
    usage: Option<String>,
    invalid_usage_message: Option<String>,
    executor: Option<Executor>,
    completer: Option<TabCompleter>,
}

impl SubcommandBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            permission: None,
            player_only: false,
            console_only: false,
            usage: None,
            invalid_usage_message: None,
            executor: None,
            completer: None,
        }
    }

    pub fn aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permission = Some(node.into());
        self
    }

    pub fn player_only(mut self) -> Self {
        self.player_only = true;
        self.console_only = false;
        self
    }

    pub fn console_only(mut self) -> Self {
        self.console_only = true;
        self.player_only = false;
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn invalid_usage_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_usage_message = Some(message.into());
        self
    }

    pub fn exec(self, executor: impl Fn(&CommandContext) + Send + Sync + 'static) -> Self {
        self.exec_result(move |ctx| {
            executor(ctx);
            Ok(())
        })
    }

    pub fn exec_result(
        mut self,
        executor: impl Fn(&CommandContext) -> CommandResult + Send + Sync + 'static,
    ) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn tab(mut self, completer: TabCompleter) -> Self {
        self.completer = Some(completer);
        self
    }

    pub(crate) fn build(self) -> Result<Subcommand> {
        validation::not_blank("subcommand name", &self.name)?;
        let executor = self.executor.ok_or_else(|| {
            crate::utils::error::FemError::validation(format!(
                "subcommand '{}' has no executor",
                self.name
            ))
        })?;
        Ok(Subcommand {
            name: self.name,
            aliases: self.aliases,
            permission: self.permission,
            player_only: self.player_only,
            console_only: self.console_only,
            usage: self.usage,
            invalid_usage_message: self.invalid_usage_message,
            executor,
            completer: self.completer,
        })
    }
}
