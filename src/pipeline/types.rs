//! Shared types for the lookup pipeline.

use serde::{Deserialize, Serialize};

// ── Inbound webhook ─────────────────────────────────────────────────

/// Event batch posted by the chat platform to the webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<ChatEvent>,
}

impl WebhookPayload {
    /// A single-event batch wrapping `text`.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            events: vec![ChatEvent {
                event_id: 1,
                message: Some(ChatMessage::with_text(text)),
            }],
        }
    }

    /// Text of the first event's message, the only one the bot reads.
    pub fn first_text(&self) -> Option<&str> {
        self.events
            .first()
            .and_then(|event| event.message.as_ref())
            .map(|message| message.text.as_str())
    }
}

/// One event in a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatEvent {
    #[serde(default)]
    pub event_id: i64,
    /// Absent for non-message events (joins, presence).
    pub message: Option<ChatMessage>,
}

/// A chat message as delivered by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatMessage {
    pub id: String,
    pub room: String,
    pub public_session_id: String,
    pub icon_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub speaker_id: String,
    pub nickname: String,
    pub text: String,
}

impl ChatMessage {
    /// A message carrying only `text` (handy for tests and tooling).
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            kind: "user".to_string(),
            text: text.into(),
            ..Default::default()
        }
    }
}
