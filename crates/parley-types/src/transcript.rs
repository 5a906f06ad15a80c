//! Transcript entry types.
//!
//! A transcript is the sanitized, role-remapped view of a session's messages
//! that gets sent upstream: stored `bot` rows appear as `assistant`, thinking
//! blocks are stripped, and rows emptied by stripping are dropped.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Role of a transcript entry as the upstream API expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    User,
    Assistant,
}

impl fmt::Display for TranscriptRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptRole::User => write!(f, "user"),
            TranscriptRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn of the conversation as sent upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(role: TranscriptRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
