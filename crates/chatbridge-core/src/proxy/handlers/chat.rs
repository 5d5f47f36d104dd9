//! `POST /api/chat`: the client-facing chat entry point.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use chatbridge_types::ProxyError;
use tracing::error;

use crate::proxy::gate::{self, ChatRequest, RequestContext};
use crate::proxy::server::AppState;

/// Body text of every unexpected failure before streaming begins.
pub const UNHANDLED_ERROR_TEXT: &str = "Error processing your request";

pub async fn handle_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, (StatusCode, String)> {
    let request: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        reject(ProxyError::Unhandled { message: format!("Invalid chat request body: {}", e) })
    })?;

    let ctx = RequestContext::from_headers(&headers);
    let turn = gate::admit(&state.registry, &ctx, request).map_err(reject)?;

    Ok(state.router.route(turn).await)
}

/// Map a pre-stream failure to its status and plain-text body.
fn reject(err: ProxyError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if err.is_pre_stream() {
        (status, err.to_string())
    } else {
        error!("Error in chat API: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, UNHANDLED_ERROR_TEXT.to_string())
    }
}
