use std::fmt;

use crate::{AnalysisKind, Notification, ProgressProfile, ResultPayload, StreamFrame};

/// Message used when a stream closes without a terminal frame.
pub const STREAM_ENDED_EARLY: &str = "stream ended before a result was received";

/// Turns the frames of one streaming session into notifications.
///
/// Guarantees at most one terminal notification and a non-decreasing
/// percentage across progress notifications.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    kind: AnalysisKind,
    profile: ProgressProfile,
    high_water: f64,
    finished: bool,
}

impl SessionTracker {
    pub fn new(kind: AnalysisKind, profile: ProgressProfile) -> Self {
        Self {
            kind,
            profile,
            high_water: 0.0,
            finished: false,
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn on_frame(&mut self, frame: StreamFrame) -> Option<Notification> {
        if self.finished {
            return None;
        }
        match frame {
            StreamFrame::Processing { progress, message } => {
                if progress.is_finite() && progress > self.high_water {
                    self.high_water = progress;
                }
                let event = self.profile.estimate(self.high_water, message);
                Some(Notification::progress(self.kind, event))
            }
            StreamFrame::Completed { result } | StreamFrame::Failed { result } => {
                self.finish(result)
            }
        }
    }

    /// Converts an exchange failure into the terminal notification.
    pub fn on_failure(&mut self, cause: impl fmt::Display) -> Option<Notification> {
        self.finish(ResultPayload::connection_failed(cause))
    }

    pub fn on_end_of_stream(&mut self) -> Option<Notification> {
        self.on_failure(STREAM_ENDED_EARLY)
    }

    fn finish(&mut self, payload: ResultPayload) -> Option<Notification> {
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(Notification::result(self.kind, payload))
    }
}
