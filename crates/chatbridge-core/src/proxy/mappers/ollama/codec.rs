use bytes::Bytes;
use chatbridge_types::protocol::openai::CHUNK_OBJECT;
use chatbridge_types::protocol::{
    ChatCompletionChunk, ChunkChoice, ChunkDelta, ChunkFrame, OllamaChatChunk, StreamErrorPayload,
};
use chrono::Utc;

/// Sentinel written after the `End` frame of a successful session.
pub const DONE_SENTINEL: &[u8] = b"data: [DONE]\n\n";

pub const FINISH_REASON_STOP: &str = "stop";

/// One decoded upstream line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// Non-empty `message.content`
    ContentDelta { text: String },
    /// Valid JSON carrying no content (role-only or the final `done` line)
    NoContent,
    /// Not JSON of the expected shape; skipped by the pump
    Malformed { raw: String },
}

pub fn decode_event(line: &str) -> BackendEvent {
    match serde_json::from_str::<OllamaChatChunk>(line) {
        Ok(chunk) => match chunk.message.and_then(|m| m.content) {
            Some(text) if !text.is_empty() => BackendEvent::ContentDelta { text },
            _ => BackendEvent::NoContent,
        },
        Err(_) => BackendEvent::Malformed { raw: line.to_string() },
    }
}

fn now_secs() -> i64 {
    Utc::now().timestamp()
}

pub fn start_frame(id: &str, model: &str) -> ChunkFrame {
    ChunkFrame::Start { id: id.to_string(), model: model.to_string(), created_at: now_secs() }
}

pub fn delta_frame(id: &str, model: &str, text: impl Into<String>) -> ChunkFrame {
    ChunkFrame::Delta {
        id: id.to_string(),
        model: model.to_string(),
        created_at: now_secs(),
        text: text.into(),
    }
}

pub fn end_frame(id: &str, model: &str) -> ChunkFrame {
    ChunkFrame::End {
        id: id.to_string(),
        model: model.to_string(),
        created_at: now_secs(),
        reason: FINISH_REASON_STOP.to_string(),
    }
}

pub fn error_frame(message: impl Into<String>) -> ChunkFrame {
    ChunkFrame::Error { message: message.into() }
}

fn chunk(
    id: &str,
    model: &str,
    created: i64,
    delta: ChunkDelta,
    finish: Option<&str>,
) -> ChatCompletionChunk {
    ChatCompletionChunk {
        id: id.to_string(),
        model: model.to_string(),
        created,
        object: CHUNK_OBJECT.to_string(),
        choices: vec![ChunkChoice {
            index: 0,
            delta,
            finish_reason: finish.map(str::to_string),
        }],
    }
}

/// Render a frame as one SSE event: `data: <json>\n\n`.
pub fn serialize(frame: &ChunkFrame) -> Bytes {
    let json = match frame {
        ChunkFrame::Start { id, model, created_at } => {
            let delta =
                ChunkDelta { role: Some("assistant".to_string()), content: Some(String::new()) };
            serde_json::to_string(&chunk(id, model, *created_at, delta, None))
        },
        ChunkFrame::Delta { id, model, created_at, text } => {
            let delta = ChunkDelta { role: None, content: Some(text.clone()) };
            serde_json::to_string(&chunk(id, model, *created_at, delta, None))
        },
        ChunkFrame::End { id, model, created_at, reason } => serde_json::to_string(&chunk(
            id,
            model,
            *created_at,
            ChunkDelta::default(),
            Some(reason),
        )),
        ChunkFrame::Error { message } => serde_json::to_string(&StreamErrorPayload {
            error: true,
            message: message.clone(),
        }),
    };
    let json = json.unwrap_or_else(|e| {
        tracing::error!("Failed to serialize {:?}: {}", frame, e);
        serialization_failure(&e)
    });
    Bytes::from(format!("data: {}\n\n", json))
}

/// Error payload sent in place of a frame that could not be serialized.
fn serialization_failure(err: &serde_json::Error) -> String {
    serde_json::json!({
        "error": true,
        "message": format!("Failed to encode stream frame: {}", err),
    })
    .to_string()
}
