//! External services module
//!
//! Alarm playback through an audio player process and the wall clock.

pub mod alarm;
pub mod clock;

// Re-export main types
pub use alarm::{AlarmError, AlarmPlayer, CommandAlarm};
pub use clock::{render_clock, CLOCK_PERIOD};
