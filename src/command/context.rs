use crate::command::messages;
use crate::domain::model::Position;
use crate::domain::ports::{CommandSender, ServerDirectory};
use crate::utils::time;
use std::str::FromStr;
use std::time::Duration;

/// Gives an executor access to the sender, the arguments, and common
/// argument parsers. All parsers return `None` instead of panicking.
pub struct CommandContext<'a> {
    pub(crate) sender: &'a dyn CommandSender,
    pub(crate) label: &'a str,
    pub(crate) args: &'a [String],
    pub(crate) directory: Option<&'a dyn ServerDirectory>,
    pub(crate) usage: Option<&'a str>,
    pub(crate) invalid_usage_message: Option<&'a str>,
}

impl<'a> CommandContext<'a> {
    pub fn sender(&self) -> &dyn CommandSender {
        self.sender
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn args(&self) -> &[String] {
        self.args
    }

    pub fn args_len(&self) -> usize {
        self.args.len()
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Joins the arguments from `from_index` on with single spaces.
    pub fn join_args(&self, from_index: usize) -> String {
        if from_index >= self.args.len() {
            return String::new();
        }
        self.args[from_index..].join(" ")
    }

    pub fn is_player(&self) -> bool {
        self.sender.is_player()
    }

    /// Parses args[index] with `FromStr`.
    pub fn parse_arg<T: FromStr>(&self, index: usize) -> Option<T> {
        self.arg(index)?.trim().parse().ok()
    }

    /// Parses args[index] into an enum-like value, retrying with upper- and
    /// lowercase so `FromStr` impls with fixed-case variants still match.
    pub fn arg_enum<T: FromStr>(&self, index: usize) -> Option<T> {
        let raw = self.arg(index)?.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse()
            .or_else(|_| raw.to_uppercase().parse())
            .or_else(|_| raw.to_lowercase().parse())
            .ok()
    }

    /// Parses duration expressions like `10s`, `5m`, `2h`, `1d`, `1h30m`,
    /// `500ms`.
    pub fn arg_duration(&self, index: usize) -> Option<Duration> {
        time::parse_duration(self.arg(index)?)
    }

    pub fn pretty_duration(&self, duration: Duration) -> String {
        time::format_duration(duration)
    }

    /// Parses `x y z [world]` starting at `start_index`. A named world that
    /// the directory does not know is treated as invalid.
    pub fn arg_position(&self, start_index: usize) -> Option<Position> {
        let x: f64 = self.parse_arg(start_index)?;
        let y: f64 = self.parse_arg(start_index + 1)?;
        let z: f64 = self.parse_arg(start_index + 2)?;

        match self.arg(start_index + 3).filter(|w| !w.is_empty()) {
            Some(world) => {
                if let Some(directory) = self.directory {
                    let known = directory
                        .worlds()
                        .iter()
                        .any(|name| name.eq_ignore_ascii_case(world));
                    if !known {
                        return None;
                    }
                }
                Some(Position::in_world(x, y, z, world))
            }
            None => Some(Position::new(x, y, z)),
        }
    }

    /// Online player by name, exact match before case-insensitive.
    pub fn arg_online_player(&self, index: usize) -> Option<String> {
        let raw = self.arg(index)?.trim();
        if raw.is_empty() {
            return None;
        }
        let players = self.directory?.online_players();
        if let Some(exact) = players.iter().find(|name| name.as_str() == raw) {
            return Some(exact.clone());
        }
        players
            .iter()
            .find(|name| name.eq_ignore_ascii_case(raw))
            .cloned()
    }

    /// Target player for commands accepting an optional `[player]`: the
    /// named player when given, the sender itself when a player.
    pub fn arg_player_or_self(&self, index: usize) -> Option<String> {
        match self.arg(index).filter(|raw| !raw.is_empty()) {
            Some(_) => self.arg_online_player(index),
            None => self
                .sender
                .is_player()
                .then(|| self.sender.name().to_string()),
        }
    }

    /// Sends the invalid-usage text with this command's usage and label.
    pub fn invalid_usage(&self) {
        messages::send_invalid_usage(
            self.sender,
            self.invalid_usage_message,
            self.usage,
            self.label,
        );
    }

    /// Sends a simple error message to the sender.
    pub fn error(&self, message: &str) {
        if !message.is_empty() {
            self.sender.send_message(message);
        }
    }
}
