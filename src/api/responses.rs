//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tasks::{CommandOutcome, SessionSnapshot};

/// API response structure for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Create a response for an accepted action
    pub fn ok(message: String, session: SessionSnapshot) -> Self {
        Self::new("ok".to_string(), message, session)
    }

    /// Create a response for a refused action
    pub fn rejected(message: String, session: SessionSnapshot) -> Self {
        Self::new("rejected".to_string(), message, session)
    }
}

impl From<CommandOutcome> for ApiResponse {
    fn from(outcome: CommandOutcome) -> Self {
        if outcome.accepted {
            Self::ok(outcome.message, outcome.session)
        } else {
            Self::rejected(outcome.message, outcome.session)
        }
    }
}

/// Body of `POST /set`. Values may be JSON strings or numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetDurationRequest {
    #[serde(default)]
    pub hours: Option<Value>,
    #[serde(default)]
    pub minutes: Option<Value>,
}

impl SetDurationRequest {
    /// Field text as it would have been typed
    pub fn field_text(value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Body of `POST /input/:field`
#[derive(Debug, Clone, Deserialize)]
pub struct InputRequest {
    pub value: String,
}

/// Status response with session and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
