//! Response orchestrator.
//!
//! [`RelayService`] coordinates one request end to end: prepare the
//! transcript (persisting the user turn for `chat`, appending a synthetic
//! continue instruction for `continue`), pick the upstream stream or an
//! in-band "unsupported model" fragment, forward every fragment to the
//! caller while accumulating it locally, and commit the accumulated text to
//! the store once the fragment sequence ends.
//!
//! Commit routing: `chat` appends a new bot message, `continue` extends the
//! most recent one. An empty accumulator is never committed. In-band error
//! fragments are committed like any other content so a later transcript
//! load shows the error verbatim.

use std::sync::Arc;

use futures_util::StreamExt;
use thiserror::Error;

use parley_types::api::{ChatAction, ChatRequest};
use parley_types::error::StorageError;
use parley_types::message::MessageRole;
use parley_types::transcript::{TranscriptEntry, TranscriptRole};

use crate::store::MessageStore;
use crate::transcript::build_transcript;
use crate::upstream::{FragmentStream, UpstreamProvider};

/// One-off instruction appended (not persisted) as the final user turn of a
/// `continue` request.
pub const CONTINUE_PROMPT: &str = "Please continue generating the response precisely from where you left off. If it is code, ensure it's a valid continuation and start with a comment indicating it's a continuation (e.g., '# Part 2', '// Continued...'). Do not add any introductory phrases or repeat previous content.";

/// Errors raised before any fragment is produced.
///
/// Everything after streaming starts is reported in-band as text fragments,
/// never as an error through the stream.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid action: '{0}'")]
    InvalidAction(String),

    #[error("missing 'text' for chat action")]
    MissingText,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The response orchestrator, generic over store and upstream seams.
pub struct RelayService<S, U> {
    store: Arc<S>,
    upstream: Arc<U>,
}

impl<S, U> RelayService<S, U>
where
    S: MessageStore + 'static,
    U: UpstreamProvider + 'static,
{
    pub fn new(store: Arc<S>, upstream: Arc<U>) -> Self {
        Self { store, upstream }
    }

    /// Handle one `/chat` request and return the fragment stream to forward
    /// to the caller.
    ///
    /// Fails only before streaming begins (invalid input, storage failure
    /// while persisting the user turn or loading history). The returned
    /// stream itself never errors; the post-stream commit runs when the
    /// stream is polled to completion. If the caller drops the stream early
    /// (client disconnect) the commit never runs and partial content is
    /// discarded.
    pub async fn respond(&self, request: ChatRequest) -> Result<FragmentStream, RelayError> {
        let action: ChatAction = request
            .action
            .parse()
            .map_err(|_| RelayError::InvalidAction(request.action.clone()))?;

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.upstream.model().to_string());

        let transcript = match action {
            ChatAction::Chat => {
                let text = request.text.ok_or(RelayError::MissingText)?;
                let body = match &request.file_info {
                    Some(info) => format!("[File: {}]\n{text}", info.name),
                    None => text,
                };
                self.store
                    .append(&request.session, MessageRole::User, &body)
                    .await?;
                build_transcript(self.store.as_ref(), &request.session).await?
            }
            ChatAction::Continue => {
                let mut transcript =
                    build_transcript(self.store.as_ref(), &request.session).await?;
                transcript.push(TranscriptEntry::new(TranscriptRole::User, CONTINUE_PROMPT));
                transcript
            }
        };

        let fragments: FragmentStream = if model == self.upstream.model() {
            self.upstream.stream(transcript)
        } else {
            let notice = format!("🚫 The selected model '{model}' is not supported.");
            Box::pin(futures_util::stream::once(async move { notice }))
        };

        let store = Arc::clone(&self.store);
        let session = request.session;

        let out = async_stream::stream! {
            let mut buffer = String::new();
            let mut fragments = std::pin::pin!(fragments);

            while let Some(chunk) = fragments.next().await {
                buffer.push_str(&chunk);
                yield chunk;
            }

            if buffer.is_empty() {
                return;
            }

            let commit = match action {
                ChatAction::Continue => store.update_last(&session, &buffer).await,
                ChatAction::Chat => store
                    .append(&session, MessageRole::Bot, &buffer)
                    .await
                    .map(|_| ()),
            };
            if let Err(err) = commit {
                // The client already received the content; best effort only.
                tracing::warn!(session = %session, error = %err, "failed to persist streamed reply");
            }
        };

        Ok(Box::pin(out))
    }
}
