//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use super::responses::{
    ApiResponse, HealthResponse, InputRequest, SetDurationRequest, StatusResponse,
};
use crate::{
    controller::InputField,
    state::AppState,
    tasks::{SessionCommand, SessionView},
};

/// Dispatch a command and turn its outcome into a response
async fn run_command(
    state: &AppState,
    action: &str,
    command: SessionCommand,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(action, command).await {
        Ok(outcome) => {
            info!("{} endpoint called - {}", action, outcome.message);
            Ok(Json(outcome.into()))
        }
        Err(e) => {
            error!("Failed to run {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /set - Set the exam duration
///
/// A request without a JSON body sets the duration from the fields as they
/// are. A JSON body that does not parse is refused.
pub async fn set_duration_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SetDurationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => SetDurationRequest::default(),
        Err(e) => {
            warn!("Malformed set request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    let command = SessionCommand::SetDuration {
        hours: request.hours.as_ref().map(SetDurationRequest::field_text),
        minutes: request.minutes.as_ref().map(SetDurationRequest::field_text),
    };
    run_command(&state, "set", command).await
}

/// Handle POST /start - Start the exam
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "start", SessionCommand::Start).await
}

/// Handle POST /stop - Stop the exam
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "stop", SessionCommand::Stop).await
}

/// Handle POST /reset - Clear the exam
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "reset", SessionCommand::Reset).await
}

/// Handle POST /sound - Toggle the alarm sound
pub async fn sound_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "sound", SessionCommand::ToggleSound).await
}

/// Handle POST /background - Toggle the background
pub async fn background_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "background", SessionCommand::ToggleBackground).await
}

/// Handle POST /zoom/in
pub async fn zoom_in_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "zoom-in", SessionCommand::ZoomIn).await
}

/// Handle POST /zoom/out
pub async fn zoom_out_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "zoom-out", SessionCommand::ZoomOut).await
}

/// Handle POST /input/:field - Type into a form field
pub async fn input_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
    Json(request): Json<InputRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let field: InputField = match field.parse() {
        Ok(field) => field,
        Err(e) => {
            return Ok(Json(ApiResponse::rejected(e, state.current_view().session)));
        }
    };
    let command = SessionCommand::EditField {
        field,
        value: request.value,
    };
    run_command(&state, "input", command).await
}

/// Handle POST /stopwatch/start
pub async fn stopwatch_start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "stopwatch-start", SessionCommand::StopwatchStart).await
}

/// Handle POST /stopwatch/stop
pub async fn stopwatch_stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "stopwatch-stop", SessionCommand::StopwatchStop).await
}

/// Handle POST /stopwatch/reset
pub async fn stopwatch_reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "stopwatch-reset", SessionCommand::StopwatchReset).await
}

/// Handle POST /notifications/:id/dismiss - Close an alert
pub async fn dismiss_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, "dismiss", SessionCommand::DismissNotification(id)).await
}

/// Handle GET /view - Return the rendered page
pub async fn view_handler(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(state.current_view())
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        session: state.current_view().session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
