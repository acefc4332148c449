use serde_json::Value;

use crate::effect::{PENDING_HIDE_AFTER, RESULT_HIDE_AFTER};
use crate::sanitize::{escape_html, sanitize_html};
use crate::view_model::{BarTone, Panel};
use crate::{AnalysisKind, Effect, Msg, Notification, OverlayState, ProgressEvent, ResultPayload};

/// Pure update function: applies a message to the overlay and returns any effects.
pub fn update(mut state: OverlayState, msg: Msg) -> (OverlayState, Vec<Effect>) {
    let effects = match msg {
        Msg::Notification(notification) => apply_notification(&mut state, notification),
        Msg::CloseClicked => {
            state.close();
            Vec::new()
        }
        Msg::HideElapsed { generation } => {
            if generation == state.generation() {
                state.close();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn apply_notification(state: &mut OverlayState, notification: Notification) -> Vec<Effect> {
    match notification {
        Notification::ModeratePending => open_pending(state, AnalysisKind::Single),
        Notification::ModeratePendingBatch => open_pending(state, AnalysisKind::Batch),
        Notification::ModerateProgress { progress }
        | Notification::ModerateBatchProgress { progress } => apply_progress(state, progress),
        Notification::ModerateResult { payload }
        | Notification::ModerateBatchResult { payload } => {
            let generation = state.open(result_panel(payload));
            vec![Effect::ScheduleHide {
                generation,
                after: RESULT_HIDE_AFTER,
            }]
        }
    }
}

fn open_pending(state: &mut OverlayState, kind: AnalysisKind) -> Vec<Effect> {
    let text = match kind {
        AnalysisKind::Single => "⏳ Initializing detection...",
        AnalysisKind::Batch => "⏳ Initializing batch analysis...",
    };
    let generation = state.open(Panel::Progress {
        text: text.to_string(),
        percentage: 0,
        details: None,
        tone: BarTone::Low,
    });
    vec![Effect::ScheduleHide {
        generation,
        after: PENDING_HIDE_AFTER,
    }]
}

fn apply_progress(state: &mut OverlayState, progress: ProgressEvent) -> Vec<Effect> {
    // Progress without an open progress panel (closed, or already showing a
    // result) is ignored.
    let Some(Panel::Progress {
        text,
        percentage,
        details,
        tone,
    }) = state.panel_mut()
    else {
        return Vec::new();
    };

    *percentage = progress.percentage.min(100);
    *text = progress.message;
    *details = Some(format!(
        "Step {}/{} • {}% • {}s elapsed",
        progress.step, progress.total_steps, progress.percentage, progress.elapsed_seconds
    ));
    *tone = BarTone::for_percentage(progress.percentage);

    let generation = state.bump();
    vec![Effect::ScheduleHide {
        generation,
        after: PENDING_HIDE_AFTER,
    }]
}

fn result_panel(payload: ResultPayload) -> Panel {
    match payload {
        ResultPayload::Success(Value::String(html)) => Panel::Success {
            html: sanitize_html(&html),
        },
        ResultPayload::Success(data) => {
            let pretty = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
            Panel::Success {
                html: format!("<pre>{}</pre>", escape_html(&pretty)),
            }
        }
        ResultPayload::Failure(message) => Panel::Failure { message },
    }
}
