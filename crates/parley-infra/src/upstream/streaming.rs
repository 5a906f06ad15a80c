//! Line-delimited stream decoding for the upstream chat API.
//!
//! The upstream responds with newline-delimited records, optionally
//! prefixed with `data: `. A `[DONE]` sentinel marks the end and is
//! ignored; records with `type == "text-delta"` carry the relayed text;
//! everything else — other discriminators, malformed JSON, blank lines —
//! is skipped silently so upstream protocol drift never aborts a stream.
//!
//! Any failure (connect, non-success status, mid-stream read error) is
//! converted into exactly one in-band error fragment and the stream
//! terminates cleanly; no error ever propagates past this module.

use futures_util::StreamExt;
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;

use parley_core::upstream::{FragmentStream, UPSTREAM_ERROR_PREFIX};

use super::types::{ChatPayload, StreamRecord};

/// Upper bound on a single protocol line.
const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Decode one protocol line into a text fragment, if it carries one.
pub(crate) fn parse_line(line: &str) -> Option<String> {
    let data = line.strip_prefix("data: ").unwrap_or(line);
    if data.is_empty() || data == "[DONE]" {
        return None;
    }
    let record: StreamRecord = serde_json::from_str(data).ok()?;
    if record.kind == "text-delta" && !record.delta.is_empty() {
        Some(record.delta)
    } else {
        None
    }
}

/// Open the streaming POST and return the lazy fragment sequence.
///
/// Pull-based: nothing is read from the socket until the consumer polls,
/// so a slow consumer throttles the upstream read. Dropping the stream
/// drops the response and closes the connection.
pub fn create_claude_stream(
    client: reqwest::Client,
    url: String,
    payload: ChatPayload,
) -> FragmentStream {
    Box::pin(async_stream::stream! {
        let response = match client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => response,
            Err(err) => {
                yield format!("{UPSTREAM_ERROR_PREFIX}{err}");
                return;
            }
        };

        let bytes = response
            .bytes_stream()
            .map(|r| r.map_err(std::io::Error::other));
        let mut lines = FramedRead::new(
            StreamReader::new(bytes),
            LinesCodec::new_with_max_length(MAX_LINE_BYTES),
        );

        while let Some(next) = lines.next().await {
            match next {
                Ok(line) => {
                    if let Some(delta) = parse_line(&line) {
                        yield delta;
                    }
                }
                Err(err) => {
                    yield format!("{UPSTREAM_ERROR_PREFIX}{err}");
                    return;
                }
            }
        }
    })
}
