//! Cancellable repeating timer used by every polling loop

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// A repeating tick bound to at most one live interval.
///
/// The first tick fires one full period after `start`. Each start opens a new
/// generation, so a consumer can tell ticks of a cancelled run apart. The
/// interval itself is created on the first `tick`, so starting and cancelling
/// work outside a runtime.
#[derive(Debug)]
pub struct Ticker {
    name: &'static str,
    period: Duration,
    armed_at: Option<Instant>,
    interval: Option<Interval>,
    generation: u64,
}

impl Ticker {
    /// Create a stopped ticker with the given period
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            period,
            armed_at: None,
            interval: None,
            generation: 0,
        }
    }

    /// Start ticking. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.armed_at.is_some() {
            debug!("{} ticker already running", self.name);
            return false;
        }

        self.armed_at = Some(Instant::now());
        self.interval = None;
        self.generation += 1;
        debug!("{} ticker started (generation {})", self.name, self.generation);
        true
    }

    /// Drop the live interval. Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        self.interval = None;
        if self.armed_at.take().is_some() {
            debug!("{} ticker cancelled (generation {})", self.name, self.generation);
            true
        } else {
            false
        }
    }

    /// Whether the ticker is armed
    pub fn is_running(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Generation of the current or last run
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick and return the generation it belongs to.
    ///
    /// Pends forever while the ticker is not running.
    pub async fn tick(&mut self) -> u64 {
        let Some(armed_at) = self.armed_at else {
            return std::future::pending().await;
        };

        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(armed_at + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
        self.generation
    }
}
