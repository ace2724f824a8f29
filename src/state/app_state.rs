//! Shared application state handed to the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::tasks::{CommandOutcome, CommandRequest, SessionCommand, SessionHandle, SessionView};

/// Handlers never touch the session directly; they queue commands for the
/// session loop and read back what it published
#[derive(Debug)]
pub struct AppState {
    /// Command queue into the session loop
    pub commands: mpsc::Sender<CommandRequest>,
    /// Latest view published by the session loop
    pub view_rx: watch::Receiver<SessionView>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create the state around a running session loop
    pub fn new(port: u16, host: String, session: &SessionHandle) -> Self {
        Self {
            commands: session.commands.clone(),
            view_rx: session.view.clone(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a command to the session loop and wait for its outcome
    pub async fn dispatch(&self, action: &str, command: SessionCommand) -> Result<CommandOutcome, String> {
        debug!("Dispatching {}: {:?}", action, command);
        let (reply, outcome) = oneshot::channel();

        self.commands
            .send(CommandRequest { command, reply })
            .await
            .map_err(|_| "Session loop is not running".to_string())?;

        let outcome = outcome
            .await
            .map_err(|_| "Session loop dropped the command".to_string())?;

        if outcome.accepted {
            self.record_action(action);
        } else {
            warn!("{} rejected: {}", action, outcome.message);
        }
        Ok(outcome)
    }

    /// Latest published session and view
    pub fn current_view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}
