//! Transcript builder.
//!
//! Reconstructs the ordered conversation for a session from the store and
//! sanitizes it for the upstream API: stored `bot` rows become `assistant`,
//! `<think>...</think>` blocks are stripped (case-insensitive, spanning
//! newlines), surrounding whitespace is trimmed, and rows left empty by
//! stripping are dropped. This keeps private reasoning traces out of
//! anything sent back upstream.

use std::sync::OnceLock;

use regex::Regex;

use parley_types::error::StorageError;
use parley_types::message::MessageRole;
use parley_types::transcript::{TranscriptEntry, TranscriptRole};

use crate::store::MessageStore;

fn thinking_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<think>.*?</think>").expect("thinking block regex is valid")
    })
}

/// Strip thinking blocks and trim surrounding whitespace.
pub fn sanitize_content(raw: &str) -> String {
    thinking_block_re().replace_all(raw, "").trim().to_string()
}

/// Build the sanitized transcript for a session.
///
/// Preserves the store's ordering for retained rows.
pub async fn build_transcript<S: MessageStore>(
    store: &S,
    session_id: &str,
) -> Result<Vec<TranscriptEntry>, StorageError> {
    let rows = store.load_ordered(session_id).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let content = sanitize_content(&row.content);
            if content.is_empty() {
                return None;
            }
            let role = match row.role {
                MessageRole::Bot => TranscriptRole::Assistant,
                MessageRole::User => TranscriptRole::User,
            };
            Some(TranscriptEntry { role, content })
        })
        .collect())
}
