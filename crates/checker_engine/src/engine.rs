use std::sync::Arc;
use std::thread;

use checker_core::{Notification, ResultPayload};
use engine_logging::{engine_error, engine_info, engine_warn};
use tokio::sync::mpsc;

use crate::{
    AnalysisRequest, AnalysisSession, BackendSettings, FallbackSession, Mode, NotificationRelay,
    NotificationSink, StreamingSession, UiSurface,
};

enum EngineCommand {
    Analyze(AnalysisRequest),
}

/// Background side of the checker: accepts analysis requests and relays
/// their notifications to the UI surface.
///
/// Requests run concurrently on a single-threaded runtime owned by a worker
/// thread. Dropping the handle stops accepting requests and abandons any
/// session still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings, surface: Arc<dyn UiSurface>) -> Self {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
        let sink: Arc<dyn NotificationSink> = Arc::new(NotificationRelay::new(surface));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let settings = Arc::new(settings);
            runtime.block_on(async move {
                while let Some(command) = cmd_rx.recv().await {
                    let settings = Arc::clone(&settings);
                    let sink = Arc::clone(&sink);
                    tokio::spawn(async move {
                        handle_command(&settings, command, sink).await;
                    });
                }
            });
        });

        Self { cmd_tx }
    }

    pub fn analyze(&self, request: AnalysisRequest) {
        if self.cmd_tx.send(EngineCommand::Analyze(request)).is_err() {
            engine_warn!("Engine is not running; request dropped");
        }
    }
}

async fn handle_command(
    settings: &BackendSettings,
    command: EngineCommand,
    sink: Arc<dyn NotificationSink>,
) {
    match command {
        EngineCommand::Analyze(request) => handle_request(settings, request, sink).await,
    }
}

/// Runs one user-triggered analysis end to end: pending notification, then
/// the streaming or fallback session selected by `settings.mode`.
pub async fn handle_request(
    settings: &BackendSettings,
    request: AnalysisRequest,
    sink: Arc<dyn NotificationSink>,
) {
    let kind = request.kind();
    let destination = request.destination();
    engine_info!(
        "Starting {} analysis for destination {} ({:?} mode)",
        kind,
        destination,
        settings.mode
    );
    sink.deliver(destination, Notification::pending(kind)).await;

    let context = match settings.session_context(&request) {
        Ok(context) => context,
        Err(err) => {
            engine_warn!("Cannot build request for destination {}: {}", destination, err);
            let payload = ResultPayload::connection_failed(&err);
            sink.deliver(destination, Notification::result(kind, payload))
                .await;
            return;
        }
    };

    let session: Box<dyn AnalysisSession> = match settings.mode {
        Mode::Streaming => Box::new(StreamingSession::new(settings.clone())),
        Mode::Fallback => Box::new(FallbackSession::new(settings.clone())),
    };
    session.open(context, sink).await;
}
