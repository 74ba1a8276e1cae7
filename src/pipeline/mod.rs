//! Lookup pipeline.
//!
//! Every webhook payload flows through:
//! 1. `CommandMatcher::extract()` — is the first message a `wp:` command?
//! 2. `ArticleSource::fetch()` — query-API document for the subject
//! 3. `jsonpath::resolve_str()` — title and wikitext out of the document
//! 4. `MarkupReducer::reduce()` — lead line, markup stripped
//!
//! Failures after step 1 collapse into the fallback reply.

pub mod command;
pub mod markup;
pub mod processor;
pub mod types;

pub use command::CommandMatcher;
pub use markup::{MarkupReducer, cap_reply, select_lead};
pub use processor::LookupProcessor;
pub use types::{ChatEvent, ChatMessage, WebhookPayload};
