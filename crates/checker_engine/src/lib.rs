//! Checker engine: backend exchanges, simulated progress and notification relay.
mod backend;
mod engine;
mod fallback;
mod relay;
mod stream;
mod types;

pub use backend::{BackendSettings, Endpoint, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use engine::{handle_request, EngineHandle};
pub use fallback::{FallbackSession, ProgressUpdater};
pub use relay::{DeliveryError, NotificationRelay, NotificationSink, UiSurface};
pub use stream::{AnalysisSession, StreamingSession};
pub use types::{
    AnalysisRequest, FailureKind, Mode, RequestBody, SessionContext, SessionError,
};
