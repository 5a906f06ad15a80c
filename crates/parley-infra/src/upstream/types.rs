//! Wire types for the upstream chat API.
//!
//! Request side: each transcript entry becomes one message unit with a
//! single-part text content block and a short per-send identifier; the
//! payload carries the model selector, a reasoning flag, a fresh
//! conversation id, and the submission trigger marker. Response side: one
//! JSON record per line, of which only the `text-delta` discriminator
//! carries relayed text.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parley_types::transcript::TranscriptEntry;

/// A single-part text content block.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePart {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// One conversation turn as the upstream API expects it.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadMessage {
    pub parts: Vec<MessagePart>,
    /// Short per-send identifier; generated fresh for every request, never
    /// persisted.
    pub id: String,
    pub role: String,
}

/// Body of the streaming chat POST.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub selected_model_id: String,
    pub is_reasoning_enabled: bool,
    /// Fresh conversation identifier, one per send.
    pub id: String,
    pub messages: Vec<PayloadMessage>,
    pub trigger: String,
}

impl ChatPayload {
    /// Build the request body for a transcript.
    pub fn from_transcript(model_id: &str, transcript: &[TranscriptEntry]) -> Self {
        let messages = transcript
            .iter()
            .map(|entry| PayloadMessage {
                parts: vec![MessagePart {
                    kind: "text".to_string(),
                    text: entry.content.clone(),
                }],
                id: short_id(),
                role: entry.role.to_string(),
            })
            .collect();

        Self {
            selected_model_id: model_id.to_string(),
            is_reasoning_enabled: true,
            id: short_id(),
            messages,
            trigger: "submit-user-message".to_string(),
        }
    }
}

/// First 12 characters of a hyphenated v4 UUID.
fn short_id() -> String {
    let mut id = Uuid::new_v4().to_string();
    id.truncate(12);
    id
}

/// One decoded line of the upstream response stream.
///
/// Unknown discriminators deserialize fine and are skipped by the caller;
/// `delta` defaults to empty when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub delta: String,
}
