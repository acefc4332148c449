use std::sync::Arc;
use std::time::Duration;

use checker_core::{
    AnalysisKind, DestinationId, Notification, ProgressProfile, ProgressSimulator, ResultPayload,
};
use engine_logging::{engine_debug, engine_info, engine_warn};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::backend::{encode_body, map_reqwest_error};
use crate::{
    AnalysisSession, BackendSettings, FailureKind, NotificationSink, SessionContext, SessionError,
};

/// Shortest period the updater will tick at.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Drives a [`ProgressSimulator`] on a timer and relays its progress.
///
/// The simulator lock is held while a tick is delivered, so once `stop`
/// returns no simulated progress can reach the sink any more.
pub struct ProgressUpdater {
    kind: AnalysisKind,
    destination: DestinationId,
    simulator: Arc<Mutex<ProgressSimulator>>,
    cancel: CancellationToken,
}

impl ProgressUpdater {
    pub fn new(kind: AnalysisKind, profile: ProgressProfile, destination: DestinationId) -> Self {
        Self {
            kind,
            destination,
            simulator: Arc::new(Mutex::new(ProgressSimulator::new(profile))),
            cancel: CancellationToken::new(),
        }
    }

    /// Emits the first scripted step and starts the periodic schedule.
    /// Does nothing unless the updater is idle.
    pub async fn start(&self, sink: Arc<dyn NotificationSink>) {
        let period = {
            let mut simulator = self.simulator.lock().await;
            let Some(first) = simulator.start(now()) else {
                return;
            };
            sink.deliver(self.destination, Notification::progress(self.kind, first))
                .await;
            simulator.interval().max(MIN_TICK)
        };

        let kind = self.kind;
        let destination = self.destination;
        let simulator = Arc::clone(&self.simulator);
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let mut guard = simulator.lock().await;
                        let Some(event) = guard.tick(now()) else {
                            break;
                        };
                        sink.deliver(destination, Notification::progress(kind, event)).await;
                    }
                }
            }
            engine_debug!("Progress updater for destination {} finished", destination);
        });
    }

    /// Cancels the schedule. Idempotent; a no-op before `start`.
    pub async fn stop(&self) {
        self.simulator.lock().await.stop();
        self.cancel.cancel();
    }
}

// Tokio's clock so paused test time drives the simulator too.
fn now() -> std::time::Instant {
    Instant::now().into_std()
}

/// Compatibility path for backends without streaming: one JSON exchange while
/// the progress is simulated locally.
#[derive(Debug, Clone)]
pub struct FallbackSession {
    settings: BackendSettings,
}

impl FallbackSession {
    pub fn new(settings: BackendSettings) -> Self {
        Self { settings }
    }

    async fn exchange(&self, context: &SessionContext) -> Result<ResultPayload, SessionError> {
        let client = self.settings.one_shot_client()?;
        let body = encode_body(&context.body)?;

        let response = client
            .post(context.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;
        let json = parse_body(&text);

        if !status.is_success() {
            let message = json
                .as_ref()
                .and_then(|value| value.get("msg"))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            return Err(SessionError::new(FailureKind::HttpStatus(status.as_u16()), message));
        }

        match json {
            Some(value @ Value::Object(_)) => serde_json::from_value(value)
                .map_err(|err| SessionError::new(FailureKind::MalformedBody, err.to_string())),
            _ => Err(SessionError::new(
                FailureKind::MalformedBody,
                "Backend did not return JSON",
            )),
        }
    }
}

/// An empty body counts as `{}`; anything unparsable is `None`.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return Some(Value::Object(Default::default()));
    }
    serde_json::from_str(text).ok()
}

#[async_trait::async_trait]
impl AnalysisSession for FallbackSession {
    async fn open(&self, context: SessionContext, sink: Arc<dyn NotificationSink>) {
        engine_info!(
            "Requesting {} analysis for destination {} at {}",
            context.kind,
            context.destination,
            context.endpoint
        );
        let profile = self.settings.profiles.get(context.kind).clone();
        let updater = ProgressUpdater::new(context.kind, profile, context.destination);
        updater.start(Arc::clone(&sink)).await;

        let payload = match self.exchange(&context).await {
            Ok(payload) => payload,
            Err(err) => {
                engine_warn!(
                    "Request for destination {} failed ({}): {}",
                    context.destination,
                    err.kind,
                    err
                );
                ResultPayload::failure(err.to_string())
            }
        };

        updater.stop().await;
        sink.deliver(context.destination, Notification::result(context.kind, payload))
            .await;
    }
}
