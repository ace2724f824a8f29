//! Display module
//!
//! The presentation port the controller renders through, the in-memory
//! page behind it, and time formatting shared by every display.

pub mod format;
pub mod port;
pub mod view;

// Re-export main types
pub use format::{format_time, ZERO_TIME};
pub use port::{ElementId, ExamPanel, Notification, PresentationPort};
pub use view::{ElementView, PendingNotification, ViewModel};
