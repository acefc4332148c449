use serde::{Deserialize, Serialize};

use crate::{AnalysisKind, ProgressEvent, ResultPayload};

/// Message pushed from the background relay to the page overlay.
///
/// Serialises as the envelope `{type, progress?}` / `{type, payload?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    ModeratePending,
    ModeratePendingBatch,
    ModerateProgress { progress: ProgressEvent },
    ModerateBatchProgress { progress: ProgressEvent },
    ModerateResult { payload: ResultPayload },
    ModerateBatchResult { payload: ResultPayload },
}

impl Notification {
    pub fn pending(kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::Single => Notification::ModeratePending,
            AnalysisKind::Batch => Notification::ModeratePendingBatch,
        }
    }

    pub fn progress(kind: AnalysisKind, progress: ProgressEvent) -> Self {
        match kind {
            AnalysisKind::Single => Notification::ModerateProgress { progress },
            AnalysisKind::Batch => Notification::ModerateBatchProgress { progress },
        }
    }

    pub fn result(kind: AnalysisKind, payload: ResultPayload) -> Self {
        match kind {
            AnalysisKind::Single => Notification::ModerateResult { payload },
            AnalysisKind::Batch => Notification::ModerateBatchResult { payload },
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            Notification::ModeratePending
            | Notification::ModerateProgress { .. }
            | Notification::ModerateResult { .. } => AnalysisKind::Single,
            Notification::ModeratePendingBatch
            | Notification::ModerateBatchProgress { .. }
            | Notification::ModerateBatchResult { .. } => AnalysisKind::Batch,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Notification::ModerateResult { .. } | Notification::ModerateBatchResult { .. }
        )
    }

    pub fn progress_event(&self) -> Option<&ProgressEvent> {
        match self {
            Notification::ModerateProgress { progress }
            | Notification::ModerateBatchProgress { progress } => Some(progress),
            _ => None,
        }
    }

    pub fn result_payload(&self) -> Option<&ResultPayload> {
        match self {
            Notification::ModerateResult { payload }
            | Notification::ModerateBatchResult { payload } => Some(payload),
            _ => None,
        }
    }
}
