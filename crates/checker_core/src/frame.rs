use engine_logging::{engine_trace, engine_warn};
use serde::Deserialize;
use thiserror::Error;

use crate::ResultPayload;

/// Marker that starts every event line on the wire.
pub const FRAME_PREFIX: &str = "data: ";

/// One decoded event of the backend stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    Processing { progress: f64, message: String },
    Completed { result: ResultPayload },
    Failed { result: ResultPayload },
}

impl StreamFrame {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamFrame::Processing { .. })
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid frame json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown frame status {0:?}")]
    UnknownStatus(String),
    #[error("{status} frame without {field}")]
    MissingField {
        status: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct WireFrame {
    status: String,
    progress: Option<f64>,
    message: Option<String>,
    result: Option<ResultPayload>,
}

impl TryFrom<WireFrame> for StreamFrame {
    type Error = FrameError;

    fn try_from(wire: WireFrame) -> Result<Self, FrameError> {
        match wire.status.as_str() {
            "processing" => {
                let progress = wire.progress.ok_or(FrameError::MissingField {
                    status: "processing",
                    field: "progress",
                })?;
                Ok(StreamFrame::Processing {
                    progress,
                    message: wire.message.unwrap_or_default(),
                })
            }
            "completed" => {
                let result = wire.result.ok_or(FrameError::MissingField {
                    status: "completed",
                    field: "result",
                })?;
                Ok(StreamFrame::Completed { result })
            }
            "error" => {
                let result = wire.result.ok_or(FrameError::MissingField {
                    status: "error",
                    field: "result",
                })?;
                Ok(StreamFrame::Failed { result })
            }
            other => Err(FrameError::UnknownStatus(other.to_string())),
        }
    }
}

/// Parses one complete line. Returns `None` for lines that are not event lines.
pub fn parse_frame_line(line: &str) -> Option<Result<StreamFrame, FrameError>> {
    let payload = line.trim().strip_prefix(FRAME_PREFIX)?;
    Some(
        serde_json::from_str::<WireFrame>(payload)
            .map_err(FrameError::from)
            .and_then(StreamFrame::try_from),
    )
}

/// Splits `pending` + `incoming` into complete frames and the bytes of the
/// trailing incomplete line.
///
/// Working on bytes keeps a multi-byte character split across two chunks
/// intact until its line is complete.
pub fn split_frames(pending: &[u8], incoming: &[u8]) -> (Vec<StreamFrame>, Vec<u8>) {
    let mut buffer = Vec::with_capacity(pending.len() + incoming.len());
    buffer.extend_from_slice(pending);
    buffer.extend_from_slice(incoming);

    let Some(last_newline) = buffer.iter().rposition(|b| *b == b'\n') else {
        return (Vec::new(), buffer);
    };

    let remainder = buffer.split_off(last_newline + 1);
    let mut frames = Vec::new();
    for line in buffer.split(|b| *b == b'\n') {
        decode_line(line, &mut frames);
    }
    (frames, remainder)
}

fn decode_line(line: &[u8], frames: &mut Vec<StreamFrame>) {
    let text = String::from_utf8_lossy(line);
    match parse_frame_line(&text) {
        Some(Ok(frame)) => frames.push(frame),
        Some(Err(err)) => engine_warn!("Dropping malformed stream frame: {}", err),
        None => {
            if !text.trim().is_empty() {
                engine_trace!("Ignoring non-event line of {} bytes", line.len());
            }
        }
    }
}

/// Incremental parser that owns the carry-over buffer between chunks.
#[derive(Debug, Default)]
pub struct FrameParser {
    buffer: Vec<u8>,
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        let pending = std::mem::take(&mut self.buffer);
        let (frames, remainder) = split_frames(&pending, chunk);
        self.buffer = remainder;
        frames
    }

    /// Flushes a final line that was not newline-terminated.
    pub fn finish(&mut self) -> Vec<StreamFrame> {
        let line = std::mem::take(&mut self.buffer);
        let mut frames = Vec::new();
        if !line.is_empty() {
            decode_line(&line, &mut frames);
        }
        frames
    }

    pub fn remainder(&self) -> &[u8] {
        &self.buffer
    }
}
