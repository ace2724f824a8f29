//! Exam session state machine

use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{
    input::{coerce_integer_input, parse_duration_field, InputField},
    Rejection,
};
use crate::{
    display::{format_time, ElementId, ExamPanel, Notification, PresentationPort, ZERO_TIME},
    services::AlarmPlayer,
    state::{BackgroundVariant, ExamSession, Phase},
    tasks::Ticker,
};

/// Countdown polling period
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Amount subtracted on every countdown tick, regardless of real elapsed time
pub const COUNTDOWN_STEP_MS: u64 = 1000;

/// Owns the exam session and renders it through a presentation port
#[derive(Debug)]
pub struct ExamController<P, A> {
    session: ExamSession,
    port: P,
    alarm: A,
    countdown: Ticker,
    panel_injected: bool,
}

impl<P: PresentationPort, A: AlarmPlayer> ExamController<P, A> {
    /// Create a controller in the `Unset` phase and render the initial page
    pub fn new(port: P, alarm: A, sound_enabled: bool) -> Self {
        let mut controller = Self {
            session: ExamSession::new(sound_enabled),
            port,
            alarm,
            countdown: Ticker::new("countdown", COUNTDOWN_PERIOD),
            panel_injected: false,
        };

        controller.port.set_text(ElementId::CountdownDisplay, ZERO_TIME);
        controller.apply_initial_controls();
        controller.render_sound_toggle();
        controller.port.apply_zoom(controller.session.zoom.as_f64());
        controller.port.apply_background(controller.session.background);
        controller
    }

    /// Current session fields
    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// The presentation port rendered into
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutable access for renderers that share the port, such as the clock
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Whether the countdown ticker is armed
    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_running()
    }

    /// Generation of the current or last countdown run
    pub fn countdown_generation(&self) -> u64 {
        self.countdown.generation()
    }

    /// Wait for the next countdown tick. Pends while no countdown runs.
    pub async fn next_countdown_tick(&mut self) -> u64 {
        self.countdown.tick().await
    }

    /// Apply text typed into one of the form fields
    pub fn edit_field(&mut self, field: InputField, raw: &str) -> Result<(), Rejection> {
        if field.is_numeric() && self.session.phase != Phase::Unset {
            debug!("Ignoring edit of locked {} input", field);
            return Err(Rejection::InputLocked(field));
        }

        let mut value = raw.to_string();
        let mut coerced = false;
        if field.is_numeric() {
            if let Some(replacement) = coerce_integer_input(raw) {
                debug!("Coerced {} input {:?} to {:?}", field, raw, replacement);
                value = replacement;
                coerced = true;
            }
        }

        self.port.set_text(field.element(), &value);
        *self.field_mut(field) = value;

        if coerced {
            Err(self.reject(Rejection::InvalidInput))
        } else {
            Ok(())
        }
    }

    /// Set the duration from whatever the hours and minutes fields hold
    pub fn set_duration_from_inputs(&mut self) -> Result<Phase, Rejection> {
        let hours = parse_duration_field(&self.session.hours_input);
        let minutes = parse_duration_field(&self.session.minutes_input);
        self.set_duration(hours, minutes)
    }

    /// Unset -> Set with the given duration
    pub fn set_duration(&mut self, hours: i64, minutes: i64) -> Result<Phase, Rejection> {
        if self.session.phase != Phase::Unset {
            return Err(self.reject(Rejection::NotAllowed {
                action: "set the duration",
                phase: self.session.phase,
            }));
        }

        let (Ok(h), Ok(m)) = (u64::try_from(hours), u64::try_from(minutes)) else {
            return Err(self.reject(Rejection::InvalidInput));
        };
        if h == 0 && m == 0 {
            return Err(self.reject(Rejection::InvalidDuration));
        }
        let Some(remaining_ms) = h
            .checked_mul(3600)
            .and_then(|s| s.checked_add(m.checked_mul(60)?))
            .and_then(|s| s.checked_mul(1000))
        else {
            return Err(self.reject(Rejection::InvalidDuration));
        };

        self.session.remaining_ms = remaining_ms;
        self.session.hours_input = h.to_string();
        self.session.minutes_input = m.to_string();
        self.port.set_text(ElementId::HoursInput, &self.session.hours_input);
        self.port.set_text(ElementId::MinutesInput, &self.session.minutes_input);
        self.port
            .set_text(ElementId::CountdownDisplay, &format_time(remaining_ms));

        self.port.set_enabled(ElementId::StartButton, true);
        self.port.set_enabled(ElementId::ResetButton, true);
        self.port.set_visible(ElementId::StopButton, false);
        self.port.set_enabled(ElementId::HoursInput, false);
        self.port.set_enabled(ElementId::MinutesInput, false);
        self.port.set_enabled(ElementId::SetTimerButton, false);

        info!("Exam duration set to {}h {}m", h, m);
        self.transition(Phase::Set);
        Ok(Phase::Set)
    }

    /// Set -> Running: show the exam panel and start counting down
    pub fn start_exam(&mut self) -> Result<Phase, Rejection> {
        match self.session.phase {
            Phase::Set => {}
            Phase::Unset => return Err(self.reject(Rejection::TimerNotSet)),
            phase => {
                return Err(self.reject(Rejection::NotAllowed {
                    action: "start",
                    phase,
                }))
            }
        }
        if self.session.remaining_ms == 0 {
            debug!("Start requested with nothing left to count");
            return Ok(self.session.phase);
        }

        self.port
            .inject_panel(ExamPanel::new(&self.session.exam_name, &self.session.exam_info));
        self.panel_injected = true;

        self.port.set_visible(ElementId::StartButton, false);
        self.port.set_visible(ElementId::StopButton, true);
        self.port.set_enabled(ElementId::StopButton, true);
        self.port.set_visible(ElementId::ResetButton, false);

        self.countdown.start();
        info!(
            "Exam started with {} remaining",
            format_time(self.session.remaining_ms)
        );
        self.transition(Phase::Running);
        Ok(Phase::Running)
    }

    /// Running -> Stopped
    pub fn stop_exam(&mut self) -> Result<Phase, Rejection> {
        if self.session.phase != Phase::Running {
            return Err(self.reject(Rejection::NotAllowed {
                action: "stop",
                phase: self.session.phase,
            }));
        }

        self.countdown.cancel();
        self.port.set_visible(ElementId::StopButton, false);
        self.port.set_visible(ElementId::ResetButton, true);
        self.port.set_enabled(ElementId::ResetButton, true);

        info!(
            "Exam stopped with {} remaining",
            format_time(self.session.remaining_ms)
        );
        self.transition(Phase::Stopped);
        Ok(Phase::Stopped)
    }

    /// Set/Running/Stopped -> Unset, clearing the exam
    pub fn reset_exam(&mut self) -> Result<Phase, Rejection> {
        if matches!(self.session.phase, Phase::Unset | Phase::Reset) {
            return Err(self.reject(Rejection::NotAllowed {
                action: "reset",
                phase: self.session.phase,
            }));
        }

        self.countdown.cancel();
        self.transition(Phase::Reset);

        if self.panel_injected {
            self.port.remove_panel();
            self.panel_injected = false;
        }

        self.session.clear_exam();
        self.port.set_text(ElementId::CountdownDisplay, ZERO_TIME);
        self.apply_initial_controls();

        info!("Exam reset");
        self.transition(Phase::Unset);
        Ok(Phase::Unset)
    }

    /// Countdown poll callback. Returns true if this tick expired the exam.
    ///
    /// Ticks from a cancelled run or arriving outside `Running` are dropped.
    pub fn countdown_tick(&mut self, generation: u64) -> bool {
        if self.session.phase != Phase::Running
            || !self.countdown.is_running()
            || generation != self.countdown.generation()
        {
            debug!(
                "Dropping stale countdown tick (generation {}, phase {})",
                generation, self.session.phase
            );
            return false;
        }

        self.session.remaining_ms = self.session.remaining_ms.saturating_sub(COUNTDOWN_STEP_MS);
        self.port.set_text(
            ElementId::CountdownDisplay,
            &format_time(self.session.remaining_ms),
        );

        if self.session.remaining_ms > 0 {
            return false;
        }

        info!("Exam time is over");
        if let Err(e) = self.stop_exam() {
            error!("Failed to stop expired exam: {}", e);
        }
        if self.session.sound_enabled {
            self.play_alarm();
        }
        self.port.notify(Notification::TimeOver);
        true
    }

    /// Flip the alarm sound on or off
    pub fn toggle_sound(&mut self) -> bool {
        self.session.sound_enabled = !self.session.sound_enabled;
        self.render_sound_toggle();
        info!("Sound effect {}", if self.session.sound_enabled { "on" } else { "off" });
        self.session.sound_enabled
    }

    /// Switch between the two backgrounds, returning the new one
    pub fn toggle_background(&mut self) -> BackgroundVariant {
        self.session.background = self.session.background.toggled();
        self.port.apply_background(self.session.background);
        debug!("Background set to {:?}", self.session.background);
        self.session.background
    }

    /// Zoom in one step, returning the resulting level
    pub fn zoom_in(&mut self) -> f64 {
        if self.session.zoom.zoom_in() {
            self.port.apply_zoom(self.session.zoom.as_f64());
        }
        self.session.zoom.as_f64()
    }

    /// Zoom out one step, returning the resulting level
    pub fn zoom_out(&mut self) -> f64 {
        if self.session.zoom.zoom_out() {
            self.port.apply_zoom(self.session.zoom.as_f64());
        }
        self.session.zoom.as_f64()
    }

    fn play_alarm(&mut self) {
        if let Err(e) = self.alarm.play() {
            error!("Error playing sound: {}", e);
        }
    }

    fn apply_initial_controls(&mut self) {
        for field in [
            InputField::Hours,
            InputField::Minutes,
            InputField::Name,
            InputField::Info,
        ] {
            let value = self.field_mut(field).clone();
            self.port.set_text(field.element(), &value);
        }

        self.port.set_enabled(ElementId::HoursInput, true);
        self.port.set_enabled(ElementId::MinutesInput, true);
        self.port.set_enabled(ElementId::SetTimerButton, true);

        self.port.set_visible(ElementId::StartButton, true);
        self.port.set_enabled(ElementId::StartButton, false);
        self.port.set_visible(ElementId::StopButton, false);
        self.port.set_enabled(ElementId::StopButton, false);
        self.port.set_visible(ElementId::ResetButton, true);
        self.port.set_enabled(ElementId::ResetButton, false);
    }

    fn render_sound_toggle(&mut self) {
        let label = if self.session.sound_enabled {
            "Sound Effect: On"
        } else {
            "Sound Effect: Off"
        };
        self.port.set_text(ElementId::SoundToggle, label);
        self.port
            .set_active(ElementId::SoundToggle, self.session.sound_enabled);
    }

    fn field_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Hours => &mut self.session.hours_input,
            InputField::Minutes => &mut self.session.minutes_input,
            InputField::Name => &mut self.session.exam_name,
            InputField::Info => &mut self.session.exam_info,
        }
    }

    fn reject(&mut self, rejection: Rejection) -> Rejection {
        warn!("Rejected: {}", rejection);
        if let Some(notification) = rejection.notification() {
            self.port.notify(notification);
        }
        rejection
    }

    fn transition(&mut self, to: Phase) {
        debug!("Phase {} -> {}", self.session.phase, to);
        self.session.phase = to;
    }
}
