use crate::domain::ports::CommandSender;

pub const DEFAULT_NO_PERMISSION: &str =
    "<red>You do not have permission to use this command.</red>";
pub const DEFAULT_PLAYERS_ONLY: &str = "<red>This command can only be used by players.</red>";
pub const DEFAULT_CONSOLE_ONLY: &str = "<red>This command can only be used from console.</red>";
pub const DEFAULT_INVALID_USAGE: &str = "<red>Invalid usage.</red>";
pub const DEFAULT_UNEXPECTED_ERROR: &str =
    "<red>An unexpected error occurred. Check console for details.</red>";

pub(crate) fn send_no_permission(sender: &dyn CommandSender, message: Option<&str>) {
    sender.send_message(message.unwrap_or(DEFAULT_NO_PERMISSION));
}

pub(crate) fn send_players_only(sender: &dyn CommandSender, message: Option<&str>) {
    sender.send_message(message.unwrap_or(DEFAULT_PLAYERS_ONLY));
}

pub(crate) fn send_console_only(sender: &dyn CommandSender, message: Option<&str>) {
    sender.send_message(message.unwrap_or(DEFAULT_CONSOLE_ONLY));
}

pub(crate) fn send_invalid_usage(
    sender: &dyn CommandSender,
    base_message: Option<&str>,
    usage: Option<&str>,
    label: &str,
) {
    let mut text = base_message.unwrap_or(DEFAULT_INVALID_USAGE).to_string();
    if let Some(usage) = usage.filter(|u| !u.is_empty()) {
        if label.is_empty() {
            text.push_str(&format!(" <gray>Usage:</gray> <white>{usage}</white>"));
        } else {
            text.push_str(&format!(" <gray>Usage:</gray> <white>/{label} {usage}</white>"));
        }
    }
    sender.send_message(&text);
}
