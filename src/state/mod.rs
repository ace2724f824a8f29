//! State management module
//!
//! This module contains the exam session, the stopwatch and the shared state
//! handed to the HTTP handlers.

pub mod app_state;
pub mod exam_session;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use exam_session::{BackgroundVariant, ExamSession, Phase, ZoomLevel};
pub use timer_state::TimerState;
