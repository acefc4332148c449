use checker_core::{
    AnalysisKind, Notification, ProgressEvent, ProgressProfile, ResultPayload, SessionTracker,
    StreamFrame, STREAM_ENDED_EARLY,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn processing(progress: f64, message: &str) -> StreamFrame {
    StreamFrame::Processing {
        progress,
        message: message.to_string(),
    }
}

fn tracker(kind: AnalysisKind) -> SessionTracker {
    SessionTracker::new(kind, ProgressProfile::for_kind(kind))
}

#[test]
fn half_way_single_frame_projects_step_and_elapsed() {
    let mut tracker = tracker(AnalysisKind::Single);
    let notification = tracker.on_frame(processing(50.0, "halfway")).unwrap();

    assert_eq!(
        notification,
        Notification::ModerateProgress {
            progress: ProgressEvent {
                percentage: 50,
                message: "halfway".into(),
                step: 3,
                total_steps: 6,
                elapsed_seconds: 4,
            }
        }
    );
}

#[test]
fn batch_frames_use_batch_constants() {
    let mut tracker = tracker(AnalysisKind::Batch);
    let notification = tracker.on_frame(processing(60.0, "batch")).unwrap();
    let progress = notification.progress_event().unwrap();

    assert!(matches!(notification, Notification::ModerateBatchProgress { .. }));
    assert_eq!(progress.step, 5);
    assert_eq!(progress.total_steps, 8);
    assert_eq!(progress.elapsed_seconds, 15);
}

#[test]
fn zero_progress_still_reports_first_step() {
    let mut tracker = tracker(AnalysisKind::Single);
    let notification = tracker.on_frame(processing(0.0, "start")).unwrap();
    assert_eq!(notification.progress_event().unwrap().step, 1);
}

#[test]
fn percentage_never_decreases_within_a_session() {
    let mut tracker = tracker(AnalysisKind::Single);
    let percentages: Vec<u8> = [10.0, 45.0, 30.0, 65.0]
        .into_iter()
        .filter_map(|p| tracker.on_frame(processing(p, "m")))
        .map(|n| n.progress_event().unwrap().percentage)
        .collect();
    assert_eq!(percentages, vec![10, 45, 45, 65]);
}

#[test]
fn completed_frame_is_the_only_terminal_notification() {
    let mut tracker = tracker(AnalysisKind::Single);
    let terminal = tracker.on_frame(StreamFrame::Completed {
        result: ResultPayload::Success(json!("x")),
    });

    assert_eq!(
        terminal,
        Some(Notification::ModerateResult {
            payload: ResultPayload::Success(json!("x"))
        })
    );
    assert!(tracker.is_finished());
    assert_eq!(tracker.on_frame(processing(99.0, "late")), None);
    assert_eq!(
        tracker.on_frame(StreamFrame::Failed {
            result: ResultPayload::failure("late")
        }),
        None
    );
    assert_eq!(tracker.on_failure("reset"), None);
    assert_eq!(tracker.on_end_of_stream(), None);
}

#[test]
fn failure_becomes_connection_failed_result() {
    let mut tracker = tracker(AnalysisKind::Batch);
    let terminal = tracker.on_failure("connection refused").unwrap();
    assert_eq!(
        terminal,
        Notification::ModerateBatchResult {
            payload: ResultPayload::failure("Connection failed: connection refused")
        }
    );
}

#[test]
fn stream_end_without_result_is_reported() {
    let mut tracker = tracker(AnalysisKind::Single);
    tracker.on_frame(processing(10.0, "m"));
    let terminal = tracker.on_end_of_stream().unwrap();
    assert_eq!(
        terminal.result_payload(),
        Some(&ResultPayload::failure(format!(
            "Connection failed: {STREAM_ENDED_EARLY}"
        )))
    );
}
