//! Exam session controller
//!
//! The state machine behind every exam action, the form field rules and the
//! ways an action can be refused.

pub mod exam_controller;
pub mod input;
pub mod rejection;

// Re-export main types
pub use exam_controller::{ExamController, COUNTDOWN_PERIOD, COUNTDOWN_STEP_MS};
pub use input::InputField;
pub use rejection::Rejection;
