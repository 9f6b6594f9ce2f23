use crate::domain::ports::{CommandSender, ServerDirectory};

/// Context passed to tab completion providers.
pub struct TabContext<'a> {
    pub(crate) sender: &'a dyn CommandSender,
    pub(crate) alias: &'a str,
    pub(crate) args: &'a [String],
    pub(crate) directory: Option<&'a dyn ServerDirectory>,
}

impl<'a> TabContext<'a> {
    pub fn sender(&self) -> &dyn CommandSender {
        self.sender
    }

    pub fn alias(&self) -> &str {
        self.alias
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

    /// The token currently being typed, empty before the first argument.
    pub fn current_token(&self) -> &str {
        self.args.last().map_or("", String::as_str)
    }

    pub fn directory(&self) -> Option<&dyn ServerDirectory> {
        self.directory
    }
}

type SuggestionProvider = Box<dyn Fn(&TabContext) -> Vec<String> + Send + Sync>;

struct SuggestionRule {
    // None applies at every argument position.
    index: Option<usize>,
    provider: SuggestionProvider,
}

impl SuggestionRule {
    fn matches(&self, context: &TabContext) -> bool {
        match self.index {
            Some(index) => index == context.args_len().saturating_sub(1),
            None => true,
        }
    }
}

/// Rule-driven suggestion provider: each rule is bound to an argument
/// position and contributes candidates, which are deduplicated in insertion
/// order and prefix-filtered against the current token.
pub struct TabCompleter {
    rules: Vec<SuggestionRule>,
}

impl TabCompleter {
    pub fn builder() -> TabCompleterBuilder {
        TabCompleterBuilder { rules: Vec::new() }
    }

    pub(crate) fn complete(&self, context: &TabContext) -> Vec<String> {
        let mut suggestions: Vec<String> = Vec::new();
        for rule in &self.rules {
            if !rule.matches(context) {
                continue;
            }
            for candidate in (rule.provider)(context) {
                if !suggestions.contains(&candidate) {
                    suggestions.push(candidate);
                }
            }
        }
        filter_prefix(suggestions, context.current_token())
    }
}

pub(crate) fn filter_prefix(values: Vec<String>, token: &str) -> Vec<String> {
    if token.is_empty() {
        return values;
    }
    let lower = token.to_lowercase();
    values
        .into_iter()
        .filter(|value| value.to_lowercase().starts_with(&lower))
        .collect()
}

pub struct TabCompleterBuilder {
    rules: Vec<SuggestionRule>,
}

impl TabCompleterBuilder {
    /// Provider for the given argument position.
    pub fn arg(
        mut self,
        index: usize,
        provider: impl Fn(&TabContext) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(SuggestionRule {
            index: Some(index),
            provider: Box::new(provider),
        });
        self
    }

    /// Fixed literal candidates for the given argument position.
    pub fn literals<S: Into<String>>(
        self,
        index: usize,
        literals: impl IntoIterator<Item = S>,
    ) -> Self {
        let values: Vec<String> = literals.into_iter().map(Into::into).collect();
        self.arg(index, move |_| values.clone())
    }

    /// Online player names for the given argument position.
    pub fn players(self, index: usize) -> Self {
        self.arg(index, |ctx| {
            ctx.directory().map(|d| d.online_players()).unwrap_or_default()
        })
    }

    /// World names for the given argument position.
    pub fn worlds(self, index: usize) -> Self {
        self.arg(index, |ctx| {
            ctx.directory().map(|d| d.worlds()).unwrap_or_default()
        })
    }

    /// Provider applied at every argument position.
    pub fn any(
        mut self,
        provider: impl Fn(&TabContext) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(SuggestionRule {
            index: None,
            provider: Box::new(provider),
        });
        self
    }

    pub fn build(self) -> TabCompleter {
        TabCompleter { rules: self.rules }
    }
}
