//! Request shapes for the `/chat` endpoint.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// What the caller wants from the relay.
///
/// `Chat` starts a new turn; `Continue` asks the upstream model to resume its
/// previous reply, appending the streamed text to the last stored bot
/// message instead of creating a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatAction {
    Chat,
    Continue,
}

impl fmt::Display for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatAction::Chat => write!(f, "chat"),
            ChatAction::Continue => write!(f, "continue"),
        }
    }
}

impl FromStr for ChatAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(ChatAction::Chat),
            "continue" => Ok(ChatAction::Continue),
            other => Err(format!("invalid action: '{other}'")),
        }
    }
}

/// Attachment metadata passed alongside a chat message.
///
/// Produced by `/upload_file`; only the name is relayed (as a `[File: ...]`
/// prefix line on the stored user message). Extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
}

/// Body of `POST /chat`.
///
/// `action` stays a raw string here so an unknown value reaches the relay
/// and comes back as a 400 rather than a serde rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Opaque client-supplied session identifier.
    pub session: String,
    /// Requested model; defaults to the single supported model.
    pub model: Option<String>,
    #[serde(default = "default_action")]
    pub action: String,
    /// User message text; required for `action = "chat"`.
    pub text: Option<String>,
    #[serde(rename = "fileInfo")]
    pub file_info: Option<FileInfo>,
}

fn default_action() -> String {
    "chat".to_string()
}
