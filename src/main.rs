//! Exam Timer - A state-managed exam countdown timer served over HTTP
//!
//! This is the main entry point for the exam-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use exam_timer::{
    api::create_router,
    config::Config,
    controller::ExamController,
    display::ViewModel,
    services::CommandAlarm,
    state::AppState,
    tasks::spawn_session,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("exam_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting exam-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, sound={}, alarm={} via {}",
        config.host,
        config.port,
        config.sound,
        config.alarm_sound.display(),
        config.alarm_player
    );

    if !config.alarm_sound.is_file() {
        warn!(
            "Alarm sound {} not found, expiry will be silent",
            config.alarm_sound.display()
        );
    }

    // Start the session loop that owns the exam
    let alarm = CommandAlarm::new(config.alarm_player.clone(), config.alarm_sound.clone());
    let controller = ExamController::new(ViewModel::new(), alarm, config.sound);
    let session = spawn_session(controller);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), &session));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /set                        - Set exam duration {{hours, minutes}}");
    info!("  POST /start | /stop | /reset     - Exam lifecycle");
    info!("  POST /input/:field               - Edit hours, minutes, name or info");
    info!("  POST /sound | /background        - Toggle alarm sound or background");
    info!("  POST /zoom/in | /zoom/out        - Adjust zoom");
    info!("  POST /stopwatch/start|stop|reset - Stopwatch");
    info!("  POST /notifications/:id/dismiss  - Dismiss an alert");
    info!("  GET  /view                       - Rendered page");
    info!("  GET  /status                     - Session status");
    info!("  GET  /health                     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    session.task.abort();
    info!("Server shutdown complete");
    Ok(())
}
