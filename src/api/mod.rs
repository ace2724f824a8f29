//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/set", post(set_duration_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/reset", post(reset_handler))
        .route("/sound", post(sound_handler))
        .route("/background", post(background_handler))
        .route("/zoom/in", post(zoom_in_handler))
        .route("/zoom/out", post(zoom_out_handler))
        .route("/input/:field", post(input_handler))
        .route("/stopwatch/start", post(stopwatch_start_handler))
        .route("/stopwatch/stop", post(stopwatch_stop_handler))
        .route("/stopwatch/reset", post(stopwatch_reset_handler))
        .route("/notifications/:id/dismiss", post(dismiss_handler))
        .route("/view", get(view_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
