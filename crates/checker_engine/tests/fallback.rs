mod common;

use std::sync::Arc;
use std::time::Duration;

use checker_core::{AnalysisKind, Notification, ProgressProfile, ResultPayload};
use checker_engine::{
    AnalysisRequest, AnalysisSession, BackendSettings, FallbackSession, Mode, NotificationSink,
    ProgressUpdater,
};
use common::{init_logging, percentages, terminal_payloads, RecordingSink};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fallback_settings(base_url: &str) -> BackendSettings {
    let mut settings = BackendSettings {
        base_url: base_url.to_string(),
        mode: Mode::Fallback,
        ..BackendSettings::default()
    };
    settings.profiles.single.nominal_duration = Duration::from_millis(600);
    settings.profiles.batch.nominal_duration = Duration::from_millis(800);
    settings
}

async fn run(settings: BackendSettings, request: AnalysisRequest) -> Arc<RecordingSink> {
    let context = settings.session_context(&request).unwrap();
    let sink = RecordingSink::new();
    let dyn_sink: Arc<dyn NotificationSink> = sink.clone();
    FallbackSession::new(settings).open(context, dyn_sink).await;
    sink
}

fn single_request() -> AnalysisRequest {
    AnalysisRequest::Single {
        destination: 4,
        selection: "Everyone believes it, so it's true".into(),
        page_url: "https://news.example.com/b".into(),
    }
}

#[tokio::test(start_paused = true)]
async fn updater_emits_scripted_steps_until_stopped() {
    init_logging();
    let sink = RecordingSink::new();
    let updater = ProgressUpdater::new(AnalysisKind::Single, ProgressProfile::single(), 9);

    updater.start(sink.clone()).await;
    let first = sink.notifications();
    assert_eq!(first.len(), 1);
    let event = first[0].progress_event().unwrap();
    assert_eq!((event.percentage, event.step, event.total_steps), (0, 1, 6));

    tokio::time::sleep(Duration::from_secs(10)).await;
    updater.stop().await;
    let notifications = sink.notifications();
    let seen = percentages(&notifications);

    assert!(seen.len() >= 7, "{seen:?}");
    assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]), "{seen:?}");
    assert_eq!(seen.last(), Some(&95));
    assert!(terminal_payloads(&notifications).is_empty());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(sink.len(), notifications.len());
}

#[tokio::test(start_paused = true)]
async fn batch_updater_never_reaches_hundred() {
    init_logging();
    let sink = RecordingSink::new();
    let updater = ProgressUpdater::new(AnalysisKind::Batch, ProgressProfile::batch(), 1);

    updater.start(sink.clone()).await;
    tokio::time::sleep(Duration::from_secs(26)).await;
    let notifications = sink.notifications();
    updater.stop().await;

    assert!(notifications
        .iter()
        .all(|n| matches!(n, Notification::ModerateBatchProgress { .. })));
    assert_eq!(percentages(&notifications).last(), Some(&95));
}

#[tokio::test(start_paused = true)]
async fn zero_duration_profile_keeps_ticking() {
    init_logging();
    let sink = RecordingSink::new();
    let mut profile = ProgressProfile::single();
    profile.nominal_duration = Duration::ZERO;
    let updater = ProgressUpdater::new(AnalysisKind::Single, profile, 2);

    updater.start(sink.clone()).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    updater.stop().await;

    let seen = percentages(&sink.notifications());
    assert!(seen.len() > 1, "{seen:?}");
    assert_eq!(seen.last(), Some(&95));
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent_and_safe_before_start() {
    init_logging();
    let sink = RecordingSink::new();
    let updater = ProgressUpdater::new(AnalysisKind::Single, ProgressProfile::single(), 1);

    updater.stop().await;
    updater.stop().await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(sink.len(), 0);
}

#[tokio::test]
async fn fallback_relays_simulated_progress_then_real_result() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/moderate"))
        .and(body_json(json!({
            "news_text": "https://news.example.com/b",
            "comment_text": "Everyone believes it, so it's true",
            "language": "zh"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(json!({"ok": true, "data": "Bandwagon fallacy"})),
        )
        .mount(&server)
        .await;

    let sink = run(fallback_settings(&server.uri()), single_request()).await;
    let notifications = sink.notifications();

    assert!(notifications.len() >= 2);
    assert_eq!(notifications[0].progress_event().unwrap().percentage, 0);
    assert_eq!(
        notifications.last(),
        Some(&Notification::ModerateResult {
            payload: ResultPayload::Success(json!("Bandwagon fallacy"))
        })
    );
    assert_eq!(terminal_payloads(&notifications).len(), 1);

    // The simulator was stopped before the result went out.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(sink.len(), notifications.len());
}

#[tokio::test]
async fn fallback_error_status_uses_backend_message() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/moderate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"ok": false, "msg": "Both news_text and comment_text must be provided."}),
        ))
        .mount(&server)
        .await;

    let sink = run(fallback_settings(&server.uri()), single_request()).await;
    assert_eq!(
        terminal_payloads(&sink.notifications()),
        vec![ResultPayload::failure(
            "Both news_text and comment_text must be provided."
        )]
    );
}

#[tokio::test]
async fn fallback_error_status_without_body_uses_reason() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect_all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = AnalysisRequest::Batch {
        destination: 2,
        page_url: "https://www.reddit.com/r/x/comments/1".into(),
    };
    let sink = run(fallback_settings(&server.uri()), request).await;
    assert_eq!(
        sink.notifications().last(),
        Some(&Notification::ModerateBatchResult {
            payload: ResultPayload::failure("Internal Server Error")
        })
    );
}

#[tokio::test]
async fn fallback_rejects_non_object_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/moderate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let sink = run(fallback_settings(&server.uri()), single_request()).await;
    assert_eq!(
        terminal_payloads(&sink.notifications()),
        vec![ResultPayload::failure("Backend did not return JSON")]
    );
}

#[tokio::test]
async fn fallback_empty_body_is_unknown_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/moderate"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let sink = run(fallback_settings(&server.uri()), single_request()).await;
    assert_eq!(
        terminal_payloads(&sink.notifications()),
        vec![ResultPayload::failure("Unknown error")]
    );
}
