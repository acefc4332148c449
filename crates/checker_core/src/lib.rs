//! Checker core: wire model, frame parsing, progress estimation and the pure
//! overlay state machine.
mod effect;
mod frame;
mod model;
mod msg;
mod notification;
mod profile;
mod sanitize;
mod session;
mod simulator;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PENDING_HIDE_AFTER, RESULT_HIDE_AFTER};
pub use frame::{parse_frame_line, split_frames, FrameError, FrameParser, StreamFrame, FRAME_PREFIX};
pub use model::{AnalysisKind, DestinationId, ProgressEvent, ResultPayload};
pub use msg::Msg;
pub use notification::Notification;
pub use profile::{ProgressProfile, Profiles, ScriptedStep};
pub use sanitize::{escape_html, sanitize_html};
pub use session::{SessionTracker, STREAM_ENDED_EARLY};
pub use simulator::{ProgressSimulator, SimulatorPhase, SIMULATED_CEILING};
pub use state::OverlayState;
pub use update::update;
pub use view_model::{BarTone, OverlayView, Panel};
