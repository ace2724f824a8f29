//! Presentation port: everything the controller is allowed to do to the screen

use serde::{Deserialize, Serialize};

use crate::state::BackgroundVariant;

/// Addressable elements of the exam page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementId {
    Clock,
    Date,
    CountdownDisplay,
    StopwatchDisplay,
    HoursInput,
    MinutesInput,
    NameInput,
    InfoInput,
    SetTimerButton,
    StartButton,
    StopButton,
    ResetButton,
    SoundToggle,
    BackgroundToggle,
    ZoomIn,
    ZoomOut,
}

impl ElementId {
    pub const ALL: [ElementId; 16] = [
        ElementId::Clock,
        ElementId::Date,
        ElementId::CountdownDisplay,
        ElementId::StopwatchDisplay,
        ElementId::HoursInput,
        ElementId::MinutesInput,
        ElementId::NameInput,
        ElementId::InfoInput,
        ElementId::SetTimerButton,
        ElementId::StartButton,
        ElementId::StopButton,
        ElementId::ResetButton,
        ElementId::SoundToggle,
        ElementId::BackgroundToggle,
        ElementId::ZoomIn,
        ElementId::ZoomOut,
    ];
}

/// Read-only exam information shown while an exam runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPanel {
    pub name: String,
    pub info: String,
}

impl ExamPanel {
    /// Build a panel, falling back to a single blank for empty fields
    pub fn new(name: &str, info: &str) -> Self {
        fn or_blank(text: &str) -> String {
            if text.is_empty() { " ".to_string() } else { text.to_string() }
        }

        Self {
            name: or_blank(name),
            info: or_blank(info),
        }
    }
}

/// Modal alerts raised to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    InvalidNumber,
    InvalidDuration,
    TimerNotSet,
    TimeOver,
}

impl Notification {
    /// Text shown in the alert
    pub fn message(&self) -> &'static str {
        match self {
            Notification::InvalidNumber => "Please enter only whole numbers (integers).",
            Notification::InvalidDuration => "Please enter a valid exam duration.",
            Notification::TimerNotSet => "Please set the timer before starting the exam.",
            Notification::TimeOver => "Exam time is over!",
        }
    }
}

/// Output surface the controller renders into.
///
/// Implementations must not call back into the controller.
pub trait PresentationPort {
    fn set_text(&mut self, id: ElementId, value: &str);
    fn set_visible(&mut self, id: ElementId, visible: bool);
    fn set_enabled(&mut self, id: ElementId, enabled: bool);
    /// Highlight state of toggle controls
    fn set_active(&mut self, id: ElementId, active: bool);
    fn inject_panel(&mut self, panel: ExamPanel);
    fn remove_panel(&mut self);
    fn apply_zoom(&mut self, level: f64);
    fn apply_background(&mut self, variant: BackgroundVariant);
    fn notify(&mut self, notification: Notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_panel_fields_render_blank() {
        let panel = ExamPanel::new("", "");
        assert_eq!(panel.name, " ");
        assert_eq!(panel.info, " ");

        let panel = ExamPanel::new("Physics", "");
        assert_eq!(panel.name, "Physics");
        assert_eq!(panel.info, " ");
    }

    #[test]
    fn element_ids_serialize_kebab_case() {
        let json = serde_json::to_string(&ElementId::CountdownDisplay).unwrap();
        assert_eq!(json, "\"countdown-display\"");
    }
}
