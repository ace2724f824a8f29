//! Reasons a user action is turned down

use thiserror::Error;

use super::input::InputField;
use crate::{display::Notification, state::Phase};

/// A user action that was refused without changing the session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{}", Notification::InvalidNumber.message())]
    InvalidInput,

    #[error("{}", Notification::InvalidDuration.message())]
    InvalidDuration,

    #[error("{}", Notification::TimerNotSet.message())]
    TimerNotSet,

    #[error("{0} input is locked until the exam is reset")]
    InputLocked(InputField),

    #[error("cannot {action} while the exam is {phase}")]
    NotAllowed { action: &'static str, phase: Phase },
}

impl Rejection {
    /// Alert shown to the user for this rejection, if any.
    ///
    /// Phase and lock rejections correspond to controls the page already
    /// hides or disables, so they are not announced.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Rejection::InvalidInput => Some(Notification::InvalidNumber),
            Rejection::InvalidDuration => Some(Notification::InvalidDuration),
            Rejection::TimerNotSet => Some(Notification::TimerNotSet),
            Rejection::InputLocked(_) | Rejection::NotAllowed { .. } => None,
        }
    }
}
