//! HTTP API end to end through the router

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use exam_timer::{
    api::create_router,
    controller::ExamController,
    display::ViewModel,
    services::{AlarmError, AlarmPlayer},
    state::AppState,
    tasks::spawn_session,
};

struct NoAlarm;

impl AlarmPlayer for NoAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        Ok(())
    }
}

fn app() -> Router {
    let session = spawn_session(ExamController::new(ViewModel::new(), NoAlarm, false));
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), &session));
    create_router(state)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn set_and_start_an_exam() {
    let app = app();

    let (status, body) = call(&app, "POST", "/input/name", Some(json!({ "value": "Biology" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (_, body) = call(&app, "POST", "/set", Some(json!({ "hours": 1, "minutes": "30" }))).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["session"]["phase"], "set");
    assert_eq!(body["session"]["remaining_ms"], 5_400_000);
    assert_eq!(body["session"]["remaining"], "01:30:00");

    let (_, body) = call(&app, "POST", "/start", None).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["session"]["phase"], "running");

    let (_, body) = call(&app, "GET", "/view", None).await;
    assert_eq!(body["view"]["panel"]["name"], "Biology");
    assert_eq!(body["view"]["panel"]["info"], " ");
    assert_eq!(body["view"]["elements"]["start-button"]["visible"], false);
    assert_eq!(body["view"]["elements"]["stop-button"]["visible"], true);

    let (_, body) = call(&app, "POST", "/stop", None).await;
    assert_eq!(body["session"]["phase"], "stopped");

    let (_, body) = call(&app, "POST", "/reset", None).await;
    assert_eq!(body["session"]["phase"], "unset");
    assert_eq!(body["session"]["exam_name"], "");

    let (_, body) = call(&app, "GET", "/view", None).await;
    assert!(body["view"]["panel"].is_null());
    assert_eq!(body["view"]["elements"]["countdown-display"]["text"], "00:00:00");
}

#[tokio::test]
async fn start_before_set_raises_alert() {
    let app = app();

    let (status, body) = call(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["message"], "Please set the timer before starting the exam.");
    assert_eq!(body["session"]["phase"], "unset");

    let (_, body) = call(&app, "GET", "/view", None).await;
    let notifications = body["view"]["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["kind"], "timer_not_set");
    let id = notifications[0]["id"].as_u64().unwrap();

    let uri = format!("/notifications/{}/dismiss", id);
    let (_, body) = call(&app, "POST", &uri, None).await;
    assert_eq!(body["status"], "ok");
    let (_, body) = call(&app, "POST", &uri, None).await;
    assert_eq!(body["status"], "rejected");
}

#[tokio::test]
async fn zero_duration_is_rejected() {
    let app = app();

    let (_, body) = call(&app, "POST", "/set", Some(json!({ "hours": "0", "minutes": "0" }))).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["message"], "Please enter a valid exam duration.");
    assert_eq!(body["session"]["phase"], "unset");

    // No body reads whatever the fields hold, which is nothing yet
    let (_, body) = call(&app, "POST", "/set", None).await;
    assert_eq!(body["status"], "rejected");
}

#[tokio::test]
async fn malformed_set_body_is_refused() {
    let app = app();
    call(&app, "POST", "/input/minutes", Some(json!({ "value": "5" }))).await;

    let request = Request::builder()
        .method("POST")
        .uri("/set")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"hours": 2, "minutes": "#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, "GET", "/status", None).await;
    assert_eq!(body["session"]["phase"], "unset");
    assert_eq!(body["session"]["remaining_ms"], 0);
}

#[tokio::test]
async fn repeated_rejections_keep_one_alert_open() {
    let app = app();
    for _ in 0..100 {
        let (_, body) = call(&app, "POST", "/start", None).await;
        assert_eq!(body["status"], "rejected");
    }

    let (_, body) = call(&app, "GET", "/view", None).await;
    assert_eq!(body["view"]["notifications"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn fractional_input_is_coerced() {
    let app = app();

    let (_, body) = call(&app, "POST", "/input/hours", Some(json!({ "value": "1.5" }))).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["message"], "Please enter only whole numbers (integers).");
    assert_eq!(body["session"]["hours_input"], "1");

    let (_, body) = call(&app, "POST", "/input/seconds", Some(json!({ "value": "5" }))).await;
    assert_eq!(body["status"], "rejected");
}

#[tokio::test]
async fn display_controls_round_trip() {
    let app = app();

    for _ in 0..20 {
        call(&app, "POST", "/zoom/in", None).await;
    }
    let (_, body) = call(&app, "GET", "/status", None).await;
    assert_eq!(body["session"]["zoom"], 1.5);

    call(&app, "POST", "/sound", None).await;
    let (_, body) = call(&app, "POST", "/background", None).await;
    assert_eq!(body["session"]["sound_enabled"], true);
    assert_eq!(body["session"]["background"], "alt");

    call(&app, "POST", "/sound", None).await;
    let (_, body) = call(&app, "POST", "/background", None).await;
    assert_eq!(body["session"]["sound_enabled"], false);
    assert_eq!(body["session"]["background"], "default");

    let (_, body) = call(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "background");
    assert_eq!(body["port"], 20554);
}

#[tokio::test]
async fn health_reports_version() {
    let app = app();
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
