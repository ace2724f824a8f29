//! Exam session structure and its value types

use serde::{Deserialize, Serialize};

/// Lifecycle of an exam session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No duration set yet
    Unset,
    /// Duration set, waiting for start
    Set,
    /// Countdown active
    Running,
    /// Stopped manually or by expiry
    Stopped,
    /// Being torn down; always settles in `Unset`
    Reset,
}

impl Phase {
    /// Lowercase name used in logs and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Unset => "unset",
            Phase::Set => "set",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
            Phase::Reset => "reset",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two page backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundVariant {
    #[default]
    Default,
    Alt,
}

impl BackgroundVariant {
    /// The other background
    pub fn toggled(self) -> Self {
        match self {
            BackgroundVariant::Default => BackgroundVariant::Alt,
            BackgroundVariant::Alt => BackgroundVariant::Default,
        }
    }
}

/// Zoom factor kept in tenths so stepping never drifts past the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    const MIN_TENTHS: u8 = 7;
    const MAX_TENTHS: u8 = 15;

    pub const MIN: f64 = 0.7;
    pub const MAX: f64 = 1.5;

    /// Step up by 0.1, returning false at the upper bound
    pub fn zoom_in(&mut self) -> bool {
        if self.0 < Self::MAX_TENTHS {
            self.0 += 1;
            true
        } else {
            false
        }
    }

    /// Step down by 0.1, returning false at the lower bound
    pub fn zoom_out(&mut self) -> bool {
        if self.0 > Self::MIN_TENTHS {
            self.0 -= 1;
            true
        } else {
            false
        }
    }

    /// Zoom factor as a scale
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(10)
    }
}

impl From<ZoomLevel> for f64 {
    fn from(level: ZoomLevel) -> Self {
        level.as_f64()
    }
}

impl TryFrom<f64> for ZoomLevel {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(ZoomLevel::MIN..=ZoomLevel::MAX).contains(&value) {
            return Err(format!("zoom level {} outside [{}, {}]", value, ZoomLevel::MIN, ZoomLevel::MAX));
        }
        Ok(Self((value * 10.0).round() as u8))
    }
}

/// Everything the exam session controller owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSession {
    /// Countdown time left in milliseconds
    pub remaining_ms: u64,
    pub phase: Phase,
    pub sound_enabled: bool,
    pub zoom: ZoomLevel,
    pub background: BackgroundVariant,
    pub exam_name: String,
    pub exam_info: String,
    /// Raw text of the duration fields
    pub hours_input: String,
    pub minutes_input: String,
}

impl ExamSession {
    /// Create a session in the initial `Unset` phase
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            remaining_ms: 0,
            phase: Phase::Unset,
            sound_enabled,
            zoom: ZoomLevel::default(),
            background: BackgroundVariant::default(),
            exam_name: String::new(),
            exam_info: String::new(),
            hours_input: String::new(),
            minutes_input: String::new(),
        }
    }

    /// Clear exam inputs and the countdown, keeping display preferences
    pub fn clear_exam(&mut self) {
        self.remaining_ms = 0;
        self.exam_name.clear();
        self.exam_info.clear();
        self.hours_input.clear();
        self.minutes_input.clear();
    }
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_in_stops_at_upper_bound() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..20 {
            zoom.zoom_in();
            assert!(zoom.as_f64() <= ZoomLevel::MAX);
        }
        assert_eq!(zoom.as_f64(), 1.5);
        assert!(!zoom.zoom_in());
    }

    #[test]
    fn zoom_out_stops_at_lower_bound() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..20 {
            zoom.zoom_out();
            assert!(zoom.as_f64() >= ZoomLevel::MIN);
        }
        assert_eq!(zoom.as_f64(), 0.7);
        assert!(!zoom.zoom_out());
    }

    #[test]
    fn zoom_round_trips_through_json() {
        let zoom = ZoomLevel::try_from(1.2).unwrap();
        let json = serde_json::to_string(&zoom).unwrap();
        assert_eq!(json, "1.2");
        assert!(ZoomLevel::try_from(2.0).is_err());
    }

    #[test]
    fn background_toggle_is_an_involution() {
        let start = BackgroundVariant::default();
        assert_eq!(start.toggled(), BackgroundVariant::Alt);
        assert_eq!(start.toggled().toggled(), start);
    }

    #[test]
    fn clear_exam_keeps_preferences() {
        let mut session = ExamSession::new(true);
        session.zoom.zoom_in();
        session.exam_name = "Maths".to_string();
        session.hours_input = "2".to_string();
        session.remaining_ms = 7_200_000;

        session.clear_exam();

        assert_eq!(session.remaining_ms, 0);
        assert!(session.exam_name.is_empty());
        assert!(session.hours_input.is_empty());
        assert!(session.sound_enabled);
        assert_eq!(session.zoom.as_f64(), 1.1);
    }
}
