use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use insure_api::signature::sign_body;
use insure_api::{build_router, ApiState};
use insure_core::templates::{GENERATION_APOLOGY_TEXT, PACKAGE_PRICE};
use insure_observability::AppMetrics;
use insure_tests::{RecordingChannel, ScriptedBackend};
use serde_json::{json, Value};
use tokio::time::{sleep, timeout};
use tower::ServiceExt;

const CHANNEL_SECRET: &str = "test-channel-secret";

type TestState = ApiState<RecordingChannel, ScriptedBackend>;

fn state(channel: RecordingChannel, answer: Option<&'static str>) -> TestState {
    state_with_backend(channel, ScriptedBackend::new(answer))
}

fn state_with_backend(channel: RecordingChannel, backend: ScriptedBackend) -> TestState {
    ApiState::new(channel, backend, CHANNEL_SECRET, AppMetrics::shared())
}

fn app(state: &TestState) -> Router {
    build_router(state.clone())
}

fn text_event(user_id: &str, reply_token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "active",
        "timestamp": 1_700_000_000_000_i64,
        "replyToken": reply_token,
        "source": { "type": "user", "userId": user_id },
        "message": { "id": "468789577898262530", "type": "text", "text": text }
    })
}

fn single_event(user_id: &str, reply_token: &str, text: &str) -> Value {
    let event = text_event(user_id, reply_token, text);
    json!({ "events": [event] })
}

fn sign(secret: &str, raw: &str) -> String {
    sign_body(secret, raw.as_bytes()).expect("signature")
}

fn signed_webhook(body: &Value) -> Request<Body> {
    let raw = body.to_string();
    let signature = sign(CHANNEL_SECRET, &raw);
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-line-signature", signature)
        .body(Body::from(raw))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_counters() {
    let state = state(RecordingChannel::default(), None);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["metrics"]["events_total"], 0);
}

#[tokio::test]
async fn webhook_rejects_missing_signature() {
    let state = state(RecordingChannel::default(), None);

    let raw = single_event("U1", "t1", "สวัสดี").to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();

    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(state.dispatcher.channel().sent.lock().is_empty());
}

#[tokio::test]
async fn webhook_rejects_body_signed_with_other_secret() {
    let state = state(RecordingChannel::default(), None);
    let raw = single_event("U1", "t1", "สวัสดี").to_string();
    let signature = sign("not-the-channel-secret", &raw);

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-line-signature", signature)
        .body(Body::from(raw))
        .unwrap();

    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn webhook_rejects_signed_garbage() {
    let state = state(RecordingChannel::default(), None);
    let raw = "not json";
    let signature = sign(CHANNEL_SECRET, raw);

    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-line-signature", signature)
        .body(Body::from(raw))
        .unwrap();

    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verification_ping_returns_empty_array() {
    let state = state(RecordingChannel::default(), None);

    let ping = json!({ "destination": "Uabc", "events": [] });
    let response = app(&state).oneshot(signed_webhook(&ping)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn package_request_replies_with_card() {
    let state = state(RecordingChannel::default(), None);

    let request = signed_webhook(&single_event("U1", "token-pkg", "ดูแพ็กเกจ"));
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    let messages = parsed[0].as_array().expect("delivered messages");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["type"], "text");
    assert_eq!(messages[1]["type"], "flex");
    assert!(messages[1]["contents"].to_string().contains(PACKAGE_PRICE));
    let footer = &messages[1]["contents"]["footer"]["contents"];
    assert_eq!(footer.as_array().map(Vec::len), Some(2));
    let menu = &messages[2]["quickReply"]["items"];
    assert_eq!(menu.as_array().map(Vec::len), Some(3));

    let sent = state.dispatcher.channel().sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "token-pkg");
}

#[tokio::test]
async fn batch_keeps_per_event_outcomes_in_order() {
    let state = state(
        RecordingChannel {
            unauthorized_tokens: vec!["token-2"],
            ..RecordingChannel::default()
        },
        Some("ประกันภัยรถยนต์ชั้น 1 คุ้มครองทั้งรถเราและคู่กรณีค่ะ"),
    );

    let body = json!({
        "destination": "Uabc",
        "events": [
            text_event("U0", "token-0", "สวัสดี"),
            { "type": "follow", "replyToken": "token-1", "source": { "type": "user", "userId": "U1" } },
            text_event("U2", "token-2", "แจ้งเคลม"),
            text_event("U3", "token-3", "what's the weather")
        ]
    });

    let response = app(&state).oneshot(signed_webhook(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    let outcomes = parsed.as_array().expect("outcome array");
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0].as_array().map(Vec::len), Some(1));
    assert!(outcomes[1].is_null());
    assert!(outcomes[2].is_null());
    assert_eq!(
        outcomes[3][0]["text"],
        "ประกันภัยรถยนต์ชั้น 1 คุ้มครองทั้งรถเราและคู่กรณีค่ะ"
    );
    let menu = &outcomes[3][0]["quickReply"]["items"];
    assert_eq!(menu.as_array().map(Vec::len), Some(3));

    let snapshot = state.metrics.snapshot();
    assert_eq!(snapshot.events_total, 4);
    assert_eq!(snapshot.events_ignored_total, 1);
    assert_eq!(snapshot.delivery_auth_failures_total, 1);
    assert_eq!(snapshot.replies_delivered_total, 2);
}

#[tokio::test]
async fn generation_failure_replies_with_apology() {
    let state = state(RecordingChannel::default(), None);

    let request = signed_webhook(&single_event("U9", "token-9", "what's the weather"));
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed[0][0]["text"], GENERATION_APOLOGY_TEXT);
    assert!(parsed[0][0].get("quickReply").is_none());
    assert_eq!(state.metrics.snapshot().generation_failures_total, 1);
}

#[tokio::test]
async fn reply_is_delivered_after_client_disconnects() {
    let backend = ScriptedBackend {
        answer: Some("ตอบช้าหน่อยนะคะ"),
        delay: Some(Duration::from_millis(200)),
    };
    let state = state_with_backend(RecordingChannel::default(), backend);
    let request = signed_webhook(&single_event("U1", "token-late", "what's the weather"));

    let call = app(&state).oneshot(request);
    assert!(timeout(Duration::from_millis(50), call).await.is_err());
    assert!(state.dispatcher.channel().sent.lock().is_empty());

    sleep(Duration::from_millis(500)).await;
    let sent = state.dispatcher.channel().sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "token-late");
    assert_eq!(sent[0].1[0].as_text(), Some("ตอบช้าหน่อยนะคะ"));
}
