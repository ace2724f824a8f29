//! Alarm playback through an external audio player

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("alarm sound {} not found", .0.display())]
    MissingSound(PathBuf),

    #[error("failed to launch {player}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can sound the expiry alarm
pub trait AlarmPlayer {
    /// Play the alarm from the beginning. Must not block.
    fn play(&mut self) -> Result<(), AlarmError>;
}

/// Plays a sound file by launching a player command such as `paplay`
#[derive(Debug)]
pub struct CommandAlarm {
    player: String,
    sound: PathBuf,
    playback: Option<Child>,
}

impl CommandAlarm {
    /// Create an alarm playing `sound` with the `player` command
    pub fn new(player: impl Into<String>, sound: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            sound: sound.into(),
            playback: None,
        }
    }

    /// Sound file the alarm plays
    pub fn sound(&self) -> &Path {
        &self.sound
    }

    fn rewind(&mut self) {
        if let Some(mut previous) = self.playback.take() {
            if let Err(e) = previous.start_kill() {
                debug!("Previous alarm playback already finished: {}", e);
            }
        }
    }
}

impl AlarmPlayer for CommandAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        self.rewind();

        if !self.sound.is_file() {
            return Err(AlarmError::MissingSound(self.sound.clone()));
        }

        let child = Command::new(&self.player)
            .arg(&self.sound)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AlarmError::Spawn {
                player: self.player.clone(),
                source,
            })?;

        info!("Playing alarm {} with {}", self.sound.display(), self.player);
        self.playback = Some(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sound_is_reported() {
        let mut alarm = CommandAlarm::new("paplay", "/nonexistent/exam-timer/alarm.wav");
        let err = alarm.play().unwrap_err();
        assert!(matches!(err, AlarmError::MissingSound(_)));
        assert!(err.to_string().contains("alarm.wav"));
    }

    #[tokio::test]
    async fn unknown_player_is_reported() {
        let sound = std::env::temp_dir().join(format!("exam-timer-alarm-{}.wav", std::process::id()));
        std::fs::write(&sound, b"RIFF").unwrap();

        let mut alarm = CommandAlarm::new("exam-timer-no-such-player", &sound);
        let err = alarm.play().unwrap_err();
        assert!(matches!(err, AlarmError::Spawn { .. }));

        std::fs::remove_file(&sound).unwrap();
    }
}
