use std::sync::Arc;

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chatbridge_types::models::ChatTurn;
use chatbridge_types::protocol::{ChunkFrame, OllamaChatRequest};
use chatbridge_types::ProxyError;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

use super::codec::{self, BackendEvent, DONE_SENTINEL};
use super::line_buffer::LineReassembler;
use crate::proxy::upstream::{ByteStream, LineDelimitedBackend};

type SinkItem = Result<Bytes, std::io::Error>;

/// Lifecycle of one translation run.
///
/// `Opening → Streaming → Draining → Closed` on success,
/// `Opening | Streaming → Failed → Closed` when the backend fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Opening,
    Streaming,
    Failed,
    Draining,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// `End` and `[DONE]` were written
    Completed,
    /// An error frame with this message was the terminal frame
    Failed(String),
    /// The client stopped reading; upstream was abandoned
    ClientGone,
}

/// Summary returned when a session task finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub id: String,
    pub outcome: SessionOutcome,
    pub deltas: usize,
    pub skipped: usize,
}

/// Write half of the backpressured channel feeding the response body.
struct FrameSink {
    tx: mpsc::Sender<SinkItem>,
}

impl FrameSink {
    async fn write(&self, bytes: Bytes) -> Result<(), ProxyError> {
        self.tx.send(Ok(bytes)).await.map_err(|_| ProxyError::SinkClosed)
    }

    async fn write_frame(&self, frame: &ChunkFrame) -> Result<(), ProxyError> {
        self.write(codec::serialize(frame)).await
    }
}

struct StreamSession {
    id: String,
    model: String,
    lines: LineReassembler,
    state: PumpState,
    deltas: usize,
    skipped: usize,
}

impl StreamSession {
    /// The id is fixed here and reused for every frame of the session.
    fn new(conversation_id: Option<String>, model: String) -> Self {
        let id = conversation_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self {
            id,
            model,
            lines: LineReassembler::new(),
            state: PumpState::Opening,
            deltas: 0,
            skipped: 0,
        }
    }

    fn transition(&mut self, next: PumpState) {
        debug!("[Pump] {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    async fn emit_lines(&mut self, lines: Vec<String>, sink: &FrameSink) -> Result<(), ProxyError> {
        for line in lines {
            match codec::decode_event(&line) {
                BackendEvent::ContentDelta { text } => {
                    sink.write_frame(&codec::delta_frame(&self.id, &self.model, text)).await?;
                    self.deltas += 1;
                },
                BackendEvent::NoContent => {},
                BackendEvent::Malformed { raw } => {
                    self.skipped += 1;
                    warn!("[Pump] {}", ProxyError::DecodeSkip { raw });
                },
            }
        }
        Ok(())
    }

    fn report(&self, outcome: SessionOutcome) -> SessionReport {
        SessionReport {
            id: self.id.clone(),
            outcome,
            deltas: self.deltas,
            skipped: self.skipped,
        }
    }
}

async fn drain_upstream(
    session: &mut StreamSession,
    mut source: ByteStream,
    sink: &FrameSink,
) -> Result<(), ProxyError> {
    while let Some(fragment) = source.next().await {
        let fragment = fragment?;
        debug!("[Pump] Received fragment: {} bytes", fragment.len());
        let lines = session.lines.feed(&fragment);
        session.emit_lines(lines, sink).await?;
    }
    let tail = session.lines.flush();
    session.emit_lines(tail.into_iter().collect(), sink).await
}

/// Drive one session to completion. `sink` is owned here so the response
/// body ends whenever this returns, on every path.
async fn run_session(
    mut session: StreamSession,
    backend: Arc<dyn LineDelimitedBackend>,
    request: OllamaChatRequest,
    sink: FrameSink,
) -> SessionReport {
    let start = codec::start_frame(&session.id, &session.model);
    let result = match sink.write_frame(&start).await {
        Ok(()) => match backend.open_chat_stream(&request).await {
            Ok(source) => {
                session.transition(PumpState::Streaming);
                drain_upstream(&mut session, source, &sink).await
            },
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    let outcome = match result {
        Ok(()) => {
            session.transition(PumpState::Draining);
            let end = codec::end_frame(&session.id, &session.model);
            match sink.write_frame(&end).await {
                Ok(()) => match sink.write(Bytes::from_static(DONE_SENTINEL)).await {
                    Ok(()) => SessionOutcome::Completed,
                    Err(_) => SessionOutcome::ClientGone,
                },
                Err(_) => SessionOutcome::ClientGone,
            }
        },
        Err(ProxyError::SinkClosed) => {
            info!("[Pump] Client disconnected, abandoning {} stream", backend.provider());
            SessionOutcome::ClientGone
        },
        Err(e) => {
            session.transition(PumpState::Failed);
            let message = e.to_string();
            error!("[Pump] Error in {} streaming: {}", backend.provider(), message);
            if sink.write_frame(&codec::error_frame(&message)).await.is_err() {
                debug!("[Pump] Client gone before error frame could be written");
            }
            SessionOutcome::Failed(message)
        },
    };

    session.transition(PumpState::Closed);
    drop(sink);

    info!(
        deltas = session.deltas,
        skipped = session.skipped,
        "[Pump] Stream session closed: {:?}",
        outcome
    );
    session.report(outcome)
}

/// Translates a line-delimited backend into an SSE response, one task per request.
#[derive(Clone)]
pub struct StreamPump {
    backend: Arc<dyn LineDelimitedBackend>,
    buffer: usize,
}

impl StreamPump {
    /// `buffer` bounds how many frames may wait for a slow client.
    pub fn new(backend: Arc<dyn LineDelimitedBackend>, buffer: usize) -> Self {
        Self { backend, buffer: buffer.max(1) }
    }

    /// Start the session and return the SSE response immediately.
    pub fn respond(&self, turn: ChatTurn) -> Response {
        let (rx, _task) = self.spawn(turn);
        build_sse_response(ReceiverStream::new(rx))
    }

    /// Start the session, returning the body channel and the session task.
    pub fn spawn(&self, turn: ChatTurn) -> (mpsc::Receiver<SinkItem>, JoinHandle<SessionReport>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        let session = StreamSession::new(turn.conversation_id, turn.model.id.clone());
        let request = OllamaChatRequest::from_turn(&turn.model, &turn.messages);
        let span = tracing::info_span!("stream_session", id = %session.id, model = %session.model);

        info!(parent: &span, "[Pump] Opening {} stream", self.backend.provider());
        let task = tokio::spawn(
            run_session(session, self.backend.clone(), request, FrameSink { tx }).instrument(span),
        );
        (rx, task)
    }
}

pub fn build_sse_response(
    stream: impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
) -> Response {
    Response::builder()
        .header("Content-Type", "text/event-stream")
        .header("Cache-Control", "no-cache")
        .header("Connection", "keep-alive")
        .body(Body::from_stream(stream))
        .expect("valid streaming response")
        .into_response()
}
