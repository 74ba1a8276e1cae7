//! Wiki markup → plain-text reduction.
//!
//! The reducer picks a lead line out of the raw article and then runs a
//! fixed sequence of regex rewrites over it. Order matters: templates are
//! unwrapped only after the disambiguation template has been replaced, and
//! block tags are collapsed last so the earlier rewrites never see them
//! half-removed.

use regex::{Captures, NoExpand, Regex};

use crate::config::ReducerConfig;

/// Literal disambiguation template.
const DISAMBIGUATION_TEMPLATE: &str = "{{aimai}}";

/// What a `<tag>...</tag>` block collapses to.
const BLOCK_PLACEHOLDER: &str = "\n...\n";

/// Pick the line that best summarizes an article.
///
/// Articles conventionally open their definitional sentence with the bolded
/// term (`'''Tokyo''' is ...`), so the first such line wins. Without one the
/// first line of the document is used.
pub fn select_lead(raw: &str) -> &str {
    raw.split('\n')
        .find(|line| line.starts_with("'''") && line.contains("''' "))
        .unwrap_or_else(|| raw.split('\n').next().unwrap_or(""))
}

/// Trim trailing newlines and cap `text` at `limit` code points.
///
/// Text longer than `limit` is cut to its first `limit - 1` code points.
/// The cut is by code point, not by grapheme.
pub fn cap_reply(text: &str, limit: usize) -> String {
    let trimmed = text.trim_end_matches('\n');
    if trimmed.chars().count() > limit {
        trimmed.chars().take(limit.saturating_sub(1)).collect()
    } else {
        trimmed.to_string()
    }
}

fn before_pipe(inner: &str) -> &str {
    inner.split('|').next().unwrap_or(inner)
}

/// Ordered markup rewrite pipeline.
#[derive(Debug, Clone)]
pub struct MarkupReducer {
    link: Regex,
    bold: Regex,
    italic: Regex,
    template: Regex,
    block: Regex,
    disambiguation_notice: String,
}

impl MarkupReducer {
    /// Compile the rewrite patterns.
    pub fn new(config: ReducerConfig) -> Self {
        Self {
            link: Regex::new(r"\[\[(.+?)\]\]").unwrap(),
            bold: Regex::new(r"'''(.+?)'''").unwrap(),
            italic: Regex::new(r"''(.+?)''").unwrap(),
            template: Regex::new(r"\{\{(.+?)\}\}").unwrap(),
            block: Regex::new(r"<[^>]+?>(?:.|\n)+?</[^>]+?>").unwrap(),
            disambiguation_notice: config.disambiguation_notice,
        }
    }

    /// Reduce a raw article to its plain-text lead.
    pub fn reduce(&self, raw: &str) -> String {
        self.strip(select_lead(raw))
    }

    /// Apply the rewrite steps to `text` as-is, without lead selection.
    pub fn strip(&self, text: &str) -> String {
        // [[Target|Label]] -> Target
        let text = self
            .link
            .replace_all(text, |caps: &Captures| before_pipe(&caps[1]).to_string());
        let text = self.bold.replace_all(&text, "$1");
        let text = self.italic.replace_all(&text, "$1");
        let text = text.replace(DISAMBIGUATION_TEMPLATE, &self.disambiguation_notice);
        // {{name|arg}} -> name
        let text = self
            .template
            .replace_all(&text, |caps: &Captures| before_pipe(&caps[1]).to_string());
        self.block
            .replace_all(&text, NoExpand(BLOCK_PLACEHOLDER))
            .into_owned()
    }
}

impl Default for MarkupReducer {
    fn default() -> Self {
        Self::new(ReducerConfig::default())
    }
}
