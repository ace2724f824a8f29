//! The single event loop that owns the exam session

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::Ticker;
use crate::{
    controller::{ExamController, InputField, Rejection},
    display::{format_time, ElementId, PresentationPort, ViewModel},
    services::{render_clock, AlarmPlayer, CLOCK_PERIOD},
    state::{ExamSession, TimerState},
};

/// Capacity of the command queue between the API and the loop
const COMMAND_QUEUE: usize = 64;

/// User actions the loop accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    EditField { field: InputField, value: String },
    /// Optionally overwrite the duration fields, then set from them
    SetDuration {
        hours: Option<String>,
        minutes: Option<String>,
    },
    Start,
    Stop,
    Reset,
    ToggleSound,
    ToggleBackground,
    ZoomIn,
    ZoomOut,
    StopwatchStart,
    StopwatchStop,
    StopwatchReset,
    DismissNotification(u64),
}

/// A command together with the channel its outcome goes back on
#[derive(Debug)]
pub struct CommandRequest {
    pub command: SessionCommand,
    pub reply: oneshot::Sender<CommandOutcome>,
}

/// Session fields plus derived display values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub session: ExamSession,
    /// `remaining_ms` as shown on the countdown
    pub remaining: String,
    pub stopwatch_running: bool,
    pub stopwatch_elapsed_ms: u64,
}

impl SessionSnapshot {
    fn capture<A: AlarmPlayer>(controller: &ExamController<ViewModel, A>, stopwatch: &TimerState) -> Self {
        let session = controller.session().clone();
        Self {
            remaining: format_time(session.remaining_ms),
            session,
            stopwatch_running: stopwatch.is_running(),
            stopwatch_elapsed_ms: stopwatch.elapsed().as_millis() as u64,
        }
    }
}

/// Result of one command
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub accepted: bool,
    pub message: String,
    pub session: SessionSnapshot,
}

/// What the loop publishes after every event
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session: SessionSnapshot,
    pub view: ViewModel,
}

enum LoopEvent {
    Command(CommandRequest),
    Countdown(u64),
    Stopwatch,
    Clock,
}

/// Handles for talking to a running session loop
#[derive(Debug)]
pub struct SessionHandle {
    pub commands: mpsc::Sender<CommandRequest>,
    pub view: watch::Receiver<SessionView>,
    pub task: JoinHandle<()>,
}

/// Spawn the session loop around a freshly built controller
pub fn spawn_session<A>(controller: ExamController<ViewModel, A>) -> SessionHandle
where
    A: AlarmPlayer + Send + 'static,
{
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE);
    let stopwatch = TimerState::new(ElementId::StopwatchDisplay);
    let initial = SessionView {
        session: SessionSnapshot::capture(&controller, &stopwatch),
        view: controller.port().clone(),
    };
    let (view_tx, view_rx) = watch::channel(initial);

    let task = tokio::spawn(session_loop_task(controller, stopwatch, commands_rx, view_tx));

    SessionHandle {
        commands: commands_tx,
        view: view_rx,
        task,
    }
}

/// Serve commands and drive the countdown, stopwatch and wall clock until
/// every command sender is gone
pub async fn session_loop_task<A: AlarmPlayer>(
    mut controller: ExamController<ViewModel, A>,
    mut stopwatch: TimerState,
    mut commands: mpsc::Receiver<CommandRequest>,
    view_tx: watch::Sender<SessionView>,
) {
    info!("Starting exam session loop");

    stopwatch.reset(controller.port_mut());
    render_clock(controller.port_mut());
    let mut clock = Ticker::new("clock", CLOCK_PERIOD);
    clock.start();
    publish(&view_tx, &controller, &stopwatch);

    loop {
        let event = tokio::select! {
            request = commands.recv() => match request {
                Some(request) => LoopEvent::Command(request),
                None => break,
            },
            generation = controller.next_countdown_tick() => LoopEvent::Countdown(generation),
            _ = stopwatch.tick() => LoopEvent::Stopwatch,
            _ = clock.tick() => LoopEvent::Clock,
        };

        match event {
            LoopEvent::Command(CommandRequest { command, reply }) => {
                debug!("Session command: {:?}", command);
                let (accepted, message) = apply(&mut controller, &mut stopwatch, command);
                publish(&view_tx, &controller, &stopwatch);

                let outcome = CommandOutcome {
                    accepted,
                    message,
                    session: SessionSnapshot::capture(&controller, &stopwatch),
                };
                if reply.send(outcome).is_err() {
                    warn!("Command caller went away before the reply");
                }
            }
            LoopEvent::Countdown(generation) => {
                controller.countdown_tick(generation);
                publish(&view_tx, &controller, &stopwatch);
            }
            LoopEvent::Stopwatch => {
                stopwatch.update(controller.port_mut());
                publish(&view_tx, &controller, &stopwatch);
            }
            LoopEvent::Clock => {
                render_clock(controller.port_mut());
                publish(&view_tx, &controller, &stopwatch);
            }
        }
    }

    info!("Exam session loop finished");
}

fn apply<A: AlarmPlayer>(
    controller: &mut ExamController<ViewModel, A>,
    stopwatch: &mut TimerState,
    command: SessionCommand,
) -> (bool, String) {
    fn done(result: Result<String, Rejection>) -> (bool, String) {
        match result {
            Ok(message) => (true, message),
            Err(rejection) => (false, rejection.to_string()),
        }
    }

    match command {
        SessionCommand::EditField { field, value } => {
            done(controller.edit_field(field, &value).map(|_| format!("{} updated", field)))
        }
        SessionCommand::SetDuration { hours, minutes } => {
            let edits = [(InputField::Hours, hours), (InputField::Minutes, minutes)];
            for (field, value) in edits {
                if let Some(value) = value {
                    if let Err(rejection) = controller.edit_field(field, &value) {
                        return (false, rejection.to_string());
                    }
                }
            }
            done(controller.set_duration_from_inputs().map(|_| {
                format!(
                    "Exam duration set to {}",
                    format_time(controller.session().remaining_ms)
                )
            }))
        }
        SessionCommand::Start => done(controller.start_exam().map(|phase| format!("Exam {}", phase))),
        SessionCommand::Stop => done(controller.stop_exam().map(|_| "Exam stopped".to_string())),
        SessionCommand::Reset => done(controller.reset_exam().map(|_| "Exam reset".to_string())),
        SessionCommand::ToggleSound => {
            let on = controller.toggle_sound();
            (true, format!("Sound effect {}", if on { "on" } else { "off" }))
        }
        SessionCommand::ToggleBackground => {
            let variant = controller.toggle_background();
            (true, format!("Background {:?}", variant).to_lowercase())
        }
        SessionCommand::ZoomIn => (true, format!("Zoom {:.1}", controller.zoom_in())),
        SessionCommand::ZoomOut => (true, format!("Zoom {:.1}", controller.zoom_out())),
        SessionCommand::StopwatchStart => {
            stopwatch.start();
            (true, "Stopwatch running".to_string())
        }
        SessionCommand::StopwatchStop => {
            stopwatch.stop();
            controller.port_mut().set_text(
                ElementId::StopwatchDisplay,
                &format_time(stopwatch.elapsed().as_millis() as u64),
            );
            (true, "Stopwatch stopped".to_string())
        }
        SessionCommand::StopwatchReset => {
            stopwatch.reset(controller.port_mut());
            (true, "Stopwatch reset".to_string())
        }
        SessionCommand::DismissNotification(id) => {
            if controller.port_mut().dismiss(id) {
                (true, format!("Notification {} dismissed", id))
            } else {
                (false, format!("No pending notification {}", id))
            }
        }
    }
}

fn publish<A: AlarmPlayer>(
    view_tx: &watch::Sender<SessionView>,
    controller: &ExamController<ViewModel, A>,
    stopwatch: &TimerState,
) {
    view_tx.send_replace(SessionView {
        session: SessionSnapshot::capture(controller, stopwatch),
        view: controller.port().clone(),
    });
}
