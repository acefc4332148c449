use std::sync::Arc;

use checker_core::{FrameParser, SessionTracker, StreamFrame};
use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::backend::{encode_body, map_reqwest_error};
use crate::{BackendSettings, FailureKind, NotificationSink, SessionContext, SessionError};

/// One analysis exchange. Completion and failure are reported only through
/// the sink; exactly one terminal notification is delivered per call.
#[async_trait::async_trait]
pub trait AnalysisSession: Send + Sync {
    async fn open(&self, context: SessionContext, sink: Arc<dyn NotificationSink>);
}

/// Reads the backend's `data:` event stream and relays it as it arrives.
#[derive(Debug, Clone)]
pub struct StreamingSession {
    settings: BackendSettings,
}

impl StreamingSession {
    pub fn new(settings: BackendSettings) -> Self {
        Self { settings }
    }

    async fn exchange(
        &self,
        context: &SessionContext,
        tracker: &mut SessionTracker,
        sink: &dyn NotificationSink,
    ) -> Result<(), SessionError> {
        let client = self.settings.streaming_client()?;
        let body = encode_body(&context.body)?;

        let response = client
            .post(context.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                ),
            ));
        }

        let mut parser = FrameParser::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let frames = parser.feed(&chunk);
            if relay_frames(frames, context, tracker, sink).await {
                return Ok(());
            }
        }

        relay_frames(parser.finish(), context, tracker, sink).await;
        Ok(())
    }
}

/// Relays frames in order; returns true once the session reached its terminal frame.
async fn relay_frames(
    frames: Vec<StreamFrame>,
    context: &SessionContext,
    tracker: &mut SessionTracker,
    sink: &dyn NotificationSink,
) -> bool {
    for frame in frames {
        if let Some(notification) = tracker.on_frame(frame) {
            sink.deliver(context.destination, notification).await;
        }
        if tracker.is_finished() {
            return true;
        }
    }
    false
}

#[async_trait::async_trait]
impl AnalysisSession for StreamingSession {
    async fn open(&self, context: SessionContext, sink: Arc<dyn NotificationSink>) {
        engine_info!(
            "Opening {} stream for destination {} at {}",
            context.kind,
            context.destination,
            context.endpoint
        );
        let profile = self.settings.profiles.get(context.kind).clone();
        let mut tracker = SessionTracker::new(context.kind, profile);

        let terminal = match self.exchange(&context, &mut tracker, sink.as_ref()).await {
            Ok(()) => {
                if !tracker.is_finished() {
                    engine_warn!(
                        "Stream for destination {} ended without a result",
                        context.destination
                    );
                }
                tracker.on_end_of_stream()
            }
            Err(err) => {
                engine_warn!(
                    "Stream for destination {} failed ({}): {}",
                    context.destination,
                    err.kind,
                    err
                );
                tracker.on_failure(&err)
            }
        };

        if let Some(notification) = terminal {
            sink.deliver(context.destination, notification).await;
        }
        engine_debug!("Stream for destination {} closed", context.destination);
    }
}
