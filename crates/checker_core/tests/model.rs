use checker_core::{AnalysisKind, Notification, ProgressEvent, ResultPayload};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn payload_without_ok_is_unknown_error() {
    let payload: ResultPayload = serde_json::from_value(json!({})).unwrap();
    assert_eq!(payload, ResultPayload::failure("Unknown error"));
    assert!(!payload.is_ok());
}

#[test]
fn payload_serializes_only_populated_side() {
    let value = serde_json::to_value(ResultPayload::Success(json!("x"))).unwrap();
    assert_eq!(value, json!({"ok": true, "data": "x"}));

    let value = serde_json::to_value(ResultPayload::failure("boom")).unwrap();
    assert_eq!(value, json!({"ok": false, "msg": "boom"}));
}

#[test]
fn structured_data_is_kept_as_json() {
    let payload: ResultPayload =
        serde_json::from_value(json!({"ok": true, "data": [{"comment": "a", "fallacy": null}]}))
            .unwrap();
    assert_eq!(
        payload,
        ResultPayload::Success(json!([{"comment": "a", "fallacy": null}]))
    );
}

#[test]
fn notifications_use_envelope_type_names() {
    let progress = ProgressEvent {
        percentage: 10,
        message: "m".into(),
        step: 1,
        total_steps: 6,
        elapsed_seconds: 0,
    };

    assert_eq!(
        serde_json::to_value(Notification::pending(AnalysisKind::Batch)).unwrap(),
        json!({"type": "MODERATE_PENDING_BATCH"})
    );
    assert_eq!(
        serde_json::to_value(Notification::progress(AnalysisKind::Single, progress)).unwrap(),
        json!({
            "type": "MODERATE_PROGRESS",
            "progress": {"percentage": 10, "message": "m", "step": 1, "totalSteps": 6, "elapsedTime": 0}
        })
    );
    assert_eq!(
        serde_json::to_value(Notification::result(
            AnalysisKind::Batch,
            ResultPayload::failure("nope")
        ))
        .unwrap(),
        json!({"type": "MODERATE_BATCH_RESULT", "payload": {"ok": false, "msg": "nope"}})
    );
}

#[test]
fn notification_reports_kind_and_terminality() {
    let result = Notification::result(AnalysisKind::Single, ResultPayload::failure("x"));
    assert_eq!(result.kind(), AnalysisKind::Single);
    assert!(result.is_terminal());
    assert!(!Notification::pending(AnalysisKind::Batch).is_terminal());
    assert_eq!(
        Notification::pending(AnalysisKind::Batch).kind(),
        AnalysisKind::Batch
    );
}
