//! Lookup command recognition.

use regex::Regex;

/// Matches `<prefix><subject>` spanning a whole chat message.
#[derive(Debug, Clone)]
pub struct CommandMatcher {
    pattern: Regex,
}

impl CommandMatcher {
    /// Build a matcher for a literal command prefix such as `wp:`.
    pub fn new(prefix: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("^{}(.+)$", regex::escape(prefix)))?;
        Ok(Self { pattern })
    }

    /// Return the lookup subject if `text` is a command.
    ///
    /// The subject is everything after the prefix, untrimmed. It must be
    /// non-empty and on a single line.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for CommandMatcher {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^wp:(.+)$").unwrap(),
        }
    }
}
