//! Background tasks module
//!
//! The repeating ticker behind every polling loop and the session loop that
//! runs alongside the HTTP server.

pub mod session_loop;
pub mod ticker;

// Re-export main types
pub use session_loop::{
    session_loop_task, spawn_session, CommandOutcome, CommandRequest, SessionCommand,
    SessionHandle, SessionSnapshot, SessionView,
};
pub use ticker::Ticker;
