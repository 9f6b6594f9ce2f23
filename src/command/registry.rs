use crate::command::builder::{Command, Subcommand};
use crate::command::context::CommandContext;
use crate::command::error::CommandError;
use crate::command::messages;
use crate::command::tab::{filter_prefix, TabContext};
use crate::domain::ports::{CommandSender, ServerDirectory};
use std::collections::HashMap;
use std::sync::Arc;

/// Holds built commands and routes execution and tab completion to them.
///
/// Labels and aliases resolve case-insensitively. Dispatch handles all
/// executor failures itself; it never panics on user input.
#[derive(Default)]
pub struct CommandRegistry {
    directory: Option<Arc<dyn ServerDirectory>>,
    commands: Vec<Command>,
    lookup: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with live server lookups for player/world completions.
    pub fn with_directory(directory: Arc<dyn ServerDirectory>) -> Self {
        Self {
            directory: Some(directory),
            commands: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    pub fn register(&mut self, command: Command) {
        let index = self.commands.len();
        self.lookup.insert(command.name.to_lowercase(), index);
        for alias in &command.aliases {
            self.lookup.insert(alias.to_lowercase(), index);
        }
        self.commands.push(command);
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> + '_ {
        self.commands.iter()
    }

    /// Dispatches a raw input line, with or without a leading `/`.
    /// Returns false when the label matches no registered command.
    pub fn dispatch(&self, sender: &dyn CommandSender, line: &str) -> bool {
        let trimmed = line.trim();
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let mut parts = trimmed.split_whitespace();
        let Some(label) = parts.next() else {
            return false;
        };
        let args: Vec<String> = parts.map(str::to_string).collect();
        self.dispatch_args(sender, label, &args)
    }

    /// Dispatches an already-tokenized command invocation.
    pub fn dispatch_args(&self, sender: &dyn CommandSender, label: &str, args: &[String]) -> bool {
        let Some(command) = self.find(label) else {
            return false;
        };

        if !Self::passes_permission(sender, command.permission.as_deref()) {
            messages::send_no_permission(sender, command.no_permission_message.as_deref());
            return true;
        }
        if command.player_only && !sender.is_player() {
            messages::send_players_only(sender, command.players_only_message.as_deref());
            return true;
        }
        if command.console_only && sender.is_player() {
            messages::send_console_only(sender, command.console_only_message.as_deref());
            return true;
        }

        if !command.subcommands.is_empty() {
            if let Some(subcommand) = args.first().and_then(|first| command.find_subcommand(first))
            {
                self.run_subcommand(sender, label, &args[1..], command, subcommand);
                return true;
            }
            if command.executor.is_none() {
                self.root_context(sender, label, args, command).invalid_usage();
                return true;
            }
        }

        if let Some(executor) = &command.executor {
            let context = self.root_context(sender, label, args, command);
            let result = executor(&context);
            self.handle_result(sender, label, result);
        }
        true
    }

    /// Tab completion for a partially typed invocation.
    pub fn complete(&self, sender: &dyn CommandSender, label: &str, args: &[String]) -> Vec<String> {
        let Some(command) = self.find(label) else {
            return Vec::new();
        };

        if let Some(completer) = &command.completer {
            return completer.complete(&self.tab_context(sender, label, args));
        }

        if !command.subcommands.is_empty() {
            if args.len() <= 1 {
                let token = args.first().map(String::as_str).unwrap_or("");
                return filter_prefix(self.subcommand_names(sender, command), token);
            }
            if let Some(subcommand) = command.find_subcommand(&args[0]) {
                if let Some(completer) = &subcommand.completer {
                    return completer.complete(&self.tab_context(sender, label, &args[1..]));
                }
            }
        }
        Vec::new()
    }

    fn find(&self, label: &str) -> Option<&Command> {
        let index = *self.lookup.get(&label.to_lowercase())?;
        self.commands.get(index)
    }

    fn run_subcommand(
        &self,
        sender: &dyn CommandSender,
        label: &str,
        args: &[String],
        command: &Command,
        subcommand: &Subcommand,
    ) {
        if !Self::passes_permission(sender, subcommand.permission.as_deref()) {
            messages::send_no_permission(sender, command.no_permission_message.as_deref());
            return;
        }
        if subcommand.player_only && !sender.is_player() {
            messages::send_players_only(sender, command.players_only_message.as_deref());
            return;
        }
        if subcommand.console_only && sender.is_player() {
            messages::send_console_only(sender, command.console_only_message.as_deref());
            return;
        }

        let context = CommandContext {
            sender,
            label,
            args,
            directory: self.directory.as_deref(),
            usage: subcommand.usage.as_deref().or(command.usage.as_deref()),
            invalid_usage_message: subcommand
                .invalid_usage_message
                .as_deref()
                .or(command.invalid_usage_message.as_deref()),
        };
        let result = (subcommand.executor)(&context);
        self.handle_result(sender, label, result);
    }

    fn handle_result(
        &self,
        sender: &dyn CommandSender,
        label: &str,
        result: Result<(), CommandError>,
    ) {
        match result {
            Ok(()) => {}
            Err(CommandError::Message(text)) => sender.send_message(&text),
            Err(CommandError::Internal(error)) => {
                tracing::error!("unhandled error in command /{label}: {error:#}");
                sender.send_message(messages::DEFAULT_UNEXPECTED_ERROR);
            }
        }
    }

    fn root_context<'a>(
        &'a self,
        sender: &'a dyn CommandSender,
        label: &'a str,
        args: &'a [String],
        command: &'a Command,
    ) -> CommandContext<'a> {
        CommandContext {
            sender,
            label,
            args,
            directory: self.directory.as_deref(),
            usage: command.usage.as_deref(),
            invalid_usage_message: command.invalid_usage_message.as_deref(),
        }
    }

    fn tab_context<'a>(
        &'a self,
        sender: &'a dyn CommandSender,
        alias: &'a str,
        args: &'a [String],
    ) -> TabContext<'a> {
        TabContext {
            sender,
            alias,
            args,
            directory: self.directory.as_deref(),
        }
    }

    fn subcommand_names(&self, sender: &dyn CommandSender, command: &Command) -> Vec<String> {
        command
            .subcommands
            .iter()
            .filter(|sub| Self::passes_permission(sender, sub.permission.as_deref()))
            .map(|sub| sub.name.clone())
            .collect()
    }

    fn passes_permission(sender: &dyn CommandSender, node: Option<&str>) -> bool {
        match node {
            Some(node) if !node.is_empty() => sender.has_permission(node),
            _ => true,
        }
    }
}
