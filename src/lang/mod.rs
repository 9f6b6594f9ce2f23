//! Message templating.
//!
//! Templates carry `<key>` tags. Placeholder tags are substituted here;
//! anything else (styling tags like `<red>`) is passed through untouched
//! for the embedding platform to render.

use crate::domain::ports::CommandSender;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Placeholder<'a> {
    key: &'a str,
    value: String,
}

impl<'a> Placeholder<'a> {
    pub fn new(key: &'a str, value: impl ToString) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }
}

/// Substitutes `<key>` tags with placeholder values.
pub fn render(template: &str, placeholders: &[Placeholder]) -> String {
    let mut out = template.to_string();
    for placeholder in placeholders {
        let tag = format!("<{}>", placeholder.key);
        if out.contains(&tag) {
            out = out.replace(&tag, &placeholder.value);
        }
    }
    out
}

/// Renders a template and delivers it to the sender.
pub fn send(sender: &dyn CommandSender, template: &str, placeholders: &[Placeholder]) {
    sender.send_message(&render(template, placeholders));
}

/// Message catalog keyed by name, loadable from a config file.
///
/// Lookups for unknown keys fall back to the key itself, so a missing
/// entry shows up in-game instead of vanishing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map_or(key, String::as_str)
    }

    pub fn format(&self, key: &str, placeholders: &[Placeholder]) -> String {
        render(self.get(key), placeholders)
    }
}
