//! Lookup processor — turns a webhook payload into a reply.
//!
//! Flow:
//! 1. Command matcher → subject (no match means an empty reply, no fetch)
//! 2. Article source → query-API document
//! 3. Path resolver → title and raw wikitext
//! 4. Markup reducer → plain-text lead
//! 5. `<article URL>\n<lead>`, capped to the reply limit
//!
//! Any failure in steps 2–4 is logged and replaced by the fallback reply.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::article::{ArticleSource, article_url};
use crate::config::BotConfig;
use crate::error::{ConfigError, LookupError};
use crate::jsonpath;
use crate::pipeline::command::CommandMatcher;
use crate::pipeline::markup::{MarkupReducer, cap_reply};
use crate::pipeline::types::WebhookPayload;

/// Where the page object sits in a query-API response.
pub const PAGE_PATH: &str = "/query/pages[0]";

/// Page title, relative to the page object.
pub const TITLE_PATH: &str = "title";

/// Latest revision's wikitext, relative to the page object.
pub const CONTENT_PATH: &str = "revisions[0]/*";

/// Stateless request → reply processor, shared across handlers.
pub struct LookupProcessor {
    config: Arc<BotConfig>,
    source: Arc<dyn ArticleSource>,
    matcher: CommandMatcher,
    reducer: MarkupReducer,
}

impl LookupProcessor {
    /// Create a processor from configuration and an article source.
    pub fn new(config: Arc<BotConfig>, source: Arc<dyn ArticleSource>) -> Result<Self, ConfigError> {
        let matcher =
            CommandMatcher::new(&config.command_prefix).map_err(|e| ConfigError::InvalidValue {
                key: "PEDIA_COMMAND_PREFIX".to_string(),
                message: e.to_string(),
            })?;
        let reducer = MarkupReducer::new(config.reducer.clone());

        Ok(Self {
            config,
            source,
            matcher,
            reducer,
        })
    }

    /// Produce the webhook reply for an event batch.
    ///
    /// Only the first event's text is inspected. An empty string means
    /// "no reply".
    pub async fn respond(&self, payload: &WebhookPayload) -> String {
        let Some(text) = payload.first_text() else {
            debug!(events = payload.events.len(), "No message text in batch");
            return String::new();
        };

        let Some(subject) = self.matcher.extract(text) else {
            return String::new();
        };

        info!(subject = %subject, source = self.source.name(), "Lookup requested");

        match self.lookup(&subject).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(subject = %subject, error = %e, "Lookup failed, sending fallback reply");
                self.config.fallback_reply.clone()
            }
        }
    }

    /// Fetch, resolve and reduce one subject into a capped reply.
    pub async fn lookup(&self, subject: &str) -> Result<String, LookupError> {
        let doc = self.source.fetch(subject).await?;
        // Title and content must come from the same page.
        let page = jsonpath::lookup(&doc, PAGE_PATH)?;
        let title = jsonpath::resolve_str(page, TITLE_PATH)?;
        let content = jsonpath::resolve_str(page, CONTENT_PATH)?;

        let summary = self.reducer.reduce(&content);
        debug!(title = %title, chars = summary.chars().count(), "Article reduced");

        let reply = format!(
            "{}\n{}",
            article_url(&self.config.article_base_url, &title),
            summary
        );
        Ok(cap_reply(&reply, self.config.reply_char_limit))
    }
}
