//! ClaudeProvider -- concrete [`UpstreamProvider`] for the hosted
//! reasoning-chat endpoint.
//!
//! Serves exactly one model. Builds the camelCase payload from the
//! transcript and hands off to [`create_claude_stream`] for the
//! line-delimited decode; all failures surface as a single in-band error
//! fragment, so callers never see an error type from this provider.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

use parley_core::upstream::{FragmentStream, UpstreamProvider};
use parley_types::transcript::TranscriptEntry;

use super::streaming::create_claude_stream;
use super::types::ChatPayload;

/// Streaming provider for the hosted Claude reasoning endpoint.
pub struct ClaudeProvider {
    client: reqwest::Client,
    base_url: String,
}

impl ClaudeProvider {
    /// Model identifier exposed to clients of the relay.
    pub const MODEL: &'static str = "claude-sonnet-3.7";

    /// Model selector the upstream endpoint expects in the payload.
    const UPSTREAM_MODEL_ID: &'static str = "sonnet-3.7";

    const BASE_URL: &'static str = "https://ai-sdk-reasoning.vercel.app";

    /// Bounds on establishing the connection and on the gap between reads.
    /// Deliberately not a whole-request deadline: a long generation that
    /// keeps producing bytes must never be cut off, only an idle stream.
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(90);
    const READ_TIMEOUT: Duration = Duration::from_secs(90);

    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Self::CONNECT_TIMEOUT)
            .read_timeout(Self::READ_TIMEOUT)
            .default_headers(Self::default_headers())
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: Self::BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Browser-profile headers the endpoint expects.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("*/*"));
        headers.insert("cache-control", HeaderValue::from_static("no-cache"));
        headers.insert(
            "origin",
            HeaderValue::from_static("https://ai-sdk-reasoning.vercel.app"),
        );
        headers.insert(
            "referer",
            HeaderValue::from_static("https://ai-sdk-reasoning.vercel.app/"),
        );
        headers.insert(
            "user-agent",
            HeaderValue::from_static(
                "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Mobile Safari/537.36",
            ),
        );
        headers
    }

    fn url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

impl Default for ClaudeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamProvider for ClaudeProvider {
    fn model(&self) -> &str {
        Self::MODEL
    }

    fn stream(&self, transcript: Vec<TranscriptEntry>) -> FragmentStream {
        let payload = ChatPayload::from_transcript(Self::UPSTREAM_MODEL_ID, &transcript);
        create_claude_stream(self.client.clone(), self.url(), payload)
    }
}
