//! Configuration types.
//!
//! Built once at startup and shared read-only; nothing here changes while
//! the server runs.

use std::time::Duration;

use crate::error::ConfigError;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 80;

/// MediaWiki query API the bot reads articles from.
pub const DEFAULT_API_ENDPOINT: &str = "https://ja.wikipedia.org/w/api.php";

/// Prefix of the article link put at the top of every reply.
pub const DEFAULT_ARTICLE_BASE_URL: &str = "https://ja.wikipedia.org/wiki/";

/// Reply sent whenever a lookup fails for any reason.
pub const FALLBACK_REPLY: &str = "No pedia";

/// Replacement for the `{{aimai}}` disambiguation template.
pub const DISAMBIGUATION_NOTICE: &str = "この単語は曖昧過ぎます";

/// Settings for the markup reducer.
#[derive(Debug, Clone)]
pub struct ReducerConfig {
    /// Text substituted for `{{aimai}}`.
    pub disambiguation_notice: String,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            disambiguation_notice: DISAMBIGUATION_NOTICE.to_string(),
        }
    }
}

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Socket address the webhook server binds to.
    pub addr: String,
    /// MediaWiki `api.php` endpoint.
    pub api_endpoint: String,
    /// Base URL the escaped article title is appended to.
    pub article_base_url: String,
    /// Upper bound on one outbound article fetch.
    pub fetch_timeout: Duration,
    /// Literal prefix that turns a chat message into a lookup.
    pub command_prefix: String,
    /// Replies longer than this many code points are cut to `limit - 1`.
    pub reply_char_limit: usize,
    /// Reply used when the lookup fails.
    pub fallback_reply: String,
    pub reducer: ReducerConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            article_base_url: DEFAULT_ARTICLE_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(10),
            command_prefix: "wp:".to_string(),
            reply_char_limit: 1000,
            fallback_reply: FALLBACK_REPLY.to_string(),
            reducer: ReducerConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load configuration from the process environment.
    ///
    /// - `PORT`: listen port (default 80, bound on all interfaces)
    /// - `PEDIA_API_ENDPOINT`: MediaWiki API endpoint
    /// - `PEDIA_ARTICLE_BASE_URL`: article link prefix
    /// - `PEDIA_FETCH_TIMEOUT_SECS`: outbound fetch timeout (default 10)
    /// - `PEDIA_COMMAND_PREFIX`: command prefix (default `wp:`)
    /// - `PEDIA_REPLY_CHAR_LIMIT`: reply cap in code points (default 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BotConfig::from_env`] but reads variables through `get`.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port: u16 = get("PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let fetch_timeout = get("PEDIA_FETCH_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);

        let reply_char_limit: usize = get("PEDIA_REPLY_CHAR_LIMIT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.reply_char_limit);
        if reply_char_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PEDIA_REPLY_CHAR_LIMIT".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let command_prefix = get("PEDIA_COMMAND_PREFIX")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.command_prefix);

        Ok(Self {
            addr: format!("0.0.0.0:{}", port),
            api_endpoint: get("PEDIA_API_ENDPOINT").unwrap_or(defaults.api_endpoint),
            article_base_url: get("PEDIA_ARTICLE_BASE_URL").unwrap_or(defaults.article_base_url),
            fetch_timeout,
            command_prefix,
            reply_char_limit,
            fallback_reply: defaults.fallback_reply,
            reducer: defaults.reducer,
        })
    }

    /// Override the listen address (e.g. from `--addr`).
    pub fn with_addr(mut self, addr: Option<String>) -> Self {
        if let Some(addr) = addr {
            self.addr = addr;
        }
        self
    }
}
