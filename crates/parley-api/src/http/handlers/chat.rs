//! POST /chat - streaming chat relay.
//!
//! The response body is the raw fragment stream: plain text chunks flushed
//! as the upstream produces them. Persistence happens inside the stream
//! after the last fragment, so a client that reads to the end is guaranteed
//! the transcript was committed.

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;

use parley_types::api::ChatRequest;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, AppError> {
    let stream = state.relay.respond(request).await?;
    let body = Body::from_stream(stream.map(Ok::<_, std::convert::Infallible>));

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}
