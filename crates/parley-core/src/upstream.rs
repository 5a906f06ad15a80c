//! UpstreamProvider trait -- the seam to the remote streaming chat API.
//!
//! A provider takes the conversation so far and produces a lazy, finite
//! sequence of text fragments. The stream item is a plain `String`: any
//! failure while opening or reading the upstream connection is converted by
//! the provider into exactly one human-readable error fragment (prefixed
//! with [`UPSTREAM_ERROR_PREFIX`]), after which the stream terminates
//! cleanly. Nothing errors or panics past this boundary, so the consumer
//! can forward fragments straight to the client and commit whatever
//! accumulated without a separate error path.

use std::pin::Pin;

use futures_util::Stream;

use parley_types::transcript::TranscriptEntry;

/// Marker prefixed to the single in-band fragment a provider emits when the
/// upstream connection fails or a read errors mid-stream.
pub const UPSTREAM_ERROR_PREFIX: &str = "🚨 Claude API Error: ";

/// A pull-based, finite sequence of text fragments.
///
/// Fragment production suspends on network I/O, so a slow consumer
/// naturally throttles the upstream read.
pub type FragmentStream = Pin<Box<dyn Stream<Item = String> + Send + 'static>>;

/// Streaming chat completion provider.
pub trait UpstreamProvider: Send + Sync {
    /// The single model identifier this provider serves
    /// (e.g. "claude-sonnet-3.7").
    fn model(&self) -> &str;

    /// Open a streaming request for the given conversation and return the
    /// fragment sequence.
    fn stream(&self, transcript: Vec<TranscriptEntry>) -> FragmentStream;
}
