//! Exam Timer - A state-managed exam countdown timer served over HTTP
//!
//! The exam session is owned by a single event loop that drives the
//! countdown, stopwatch and wall clock. The HTTP layer sends it user actions
//! and reads back the rendered page.

pub mod api;
pub mod config;
pub mod controller;
pub mod display;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controller::{ExamController, Rejection};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
