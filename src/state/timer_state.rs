//! Stopwatch state for the general-purpose elapsed-time display

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::{
    display::{format_time, ElementId, PresentationPort, ZERO_TIME},
    tasks::Ticker,
};

/// Stopwatch polling period
pub const STOPWATCH_PERIOD: Duration = Duration::from_millis(10);

/// Stopwatch that accumulates time across start/stop runs
#[derive(Debug)]
pub struct TimerState {
    start_epoch: Instant,
    elapsed: Duration,
    running: bool,
    ticker: Ticker,
    sink: ElementId,
}

impl TimerState {
    /// Create a stopped stopwatch writing to the given display
    pub fn new(sink: ElementId) -> Self {
        Self {
            start_epoch: Instant::now(),
            elapsed: Duration::ZERO,
            running: false,
            ticker: Ticker::new("stopwatch", STOPWATCH_PERIOD),
            sink,
        }
    }

    /// Start or resume. Does nothing while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        let now = Instant::now();
        self.start_epoch = now.checked_sub(self.elapsed).unwrap_or(now);
        self.running = true;
        self.ticker.start();
        debug!("Stopwatch started at {:?} elapsed", self.elapsed);
    }

    /// Stop polling, keeping the elapsed time
    pub fn stop(&mut self) {
        self.ticker.cancel();
        if self.running {
            self.elapsed = self.start_epoch.elapsed();
            self.running = false;
        }
    }

    /// Stop polling, zero the elapsed time and clear the display
    pub fn reset<P: PresentationPort>(&mut self, port: &mut P) {
        self.ticker.cancel();
        self.running = false;
        self.elapsed = Duration::ZERO;
        port.set_text(self.sink, ZERO_TIME);
    }

    /// Poll callback: recompute the elapsed time and show it
    pub fn update<P: PresentationPort>(&mut self, port: &mut P) {
        if !self.running {
            return;
        }
        self.elapsed = self.start_epoch.elapsed();
        port.set_text(self.sink, &format_time(self.elapsed.as_millis() as u64));
    }

    /// Whether the stopwatch is counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time as of the last poll or stop
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wait for the next poll tick
    pub async fn tick(&mut self) -> u64 {
        self.ticker.tick().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ViewModel;

    #[tokio::test(start_paused = true)]
    async fn accumulates_only_while_running() {
        let mut view = ViewModel::new();
        let mut stopwatch = TimerState::new(ElementId::StopwatchDisplay);

        stopwatch.start();
        tokio::time::advance(Duration::from_secs(2)).await;
        stopwatch.stop();

        // Stopped time does not count
        tokio::time::advance(Duration::from_secs(30)).await;

        stopwatch.start();
        tokio::time::advance(Duration::from_secs(3)).await;
        stopwatch.update(&mut view);

        assert_eq!(stopwatch.elapsed(), Duration::from_secs(5));
        assert_eq!(view.text(ElementId::StopwatchDisplay), "00:00:05");
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_drive_the_display() {
        let mut view = ViewModel::new();
        let mut stopwatch = TimerState::new(ElementId::StopwatchDisplay);
        stopwatch.start();

        for _ in 0..150 {
            stopwatch.tick().await;
            stopwatch.update(&mut view);
        }

        assert_eq!(stopwatch.elapsed(), Duration::from_millis(1500));
        assert_eq!(view.text(ElementId::StopwatchDisplay), "00:00:01");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_zeroes_and_clears_display() {
        let mut view = ViewModel::new();
        let mut stopwatch = TimerState::new(ElementId::StopwatchDisplay);
        stopwatch.start();
        tokio::time::advance(Duration::from_secs(61)).await;
        stopwatch.update(&mut view);
        assert_eq!(view.text(ElementId::StopwatchDisplay), "00:01:01");

        stopwatch.reset(&mut view);

        assert!(!stopwatch.is_running());
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);
        assert_eq!(view.text(ElementId::StopwatchDisplay), ZERO_TIME);
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_keeps_epoch() {
        let mut view = ViewModel::new();
        let mut stopwatch = TimerState::new(ElementId::StopwatchDisplay);
        stopwatch.start();
        tokio::time::advance(Duration::from_secs(4)).await;
        stopwatch.start();
        stopwatch.update(&mut view);

        assert_eq!(stopwatch.elapsed(), Duration::from_secs(4));
    }
}
