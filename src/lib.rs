//! pedia-bot — chat webhook that answers `wp:<subject>` with an encyclopedia lead.

pub mod article;
pub mod channels;
pub mod config;
pub mod error;
pub mod jsonpath;
pub mod pipeline;
