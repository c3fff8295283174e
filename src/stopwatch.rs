//! Stopwatch: running/stopped state over a 10 ms repeating tick.
//!
//! DESIGN
//! ======
//! Elapsed time is measured against a `tokio::time::Instant` taken at start
//! and counted in whole ticks: each running segment contributes its duration
//! rounded down to a multiple of [`TICK_MS`]. Stopping banks the segment. A
//! late or starved runtime never loses time, since nothing depends on a tick
//! actually firing.
//!
//! The repeating task only publishes the live display value, shared with the
//! caller through an `AtomicU64`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::ticker::{RepeatingTask, TickerError};

/// Tick period in milliseconds.
pub const TICK_MS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum StopwatchError {
    #[error("laps can only be recorded while running")]
    NotRunning,
    #[error("ticker error: {0}")]
    Ticker(#[from] TickerError),
}

impl crate::error::ErrorCode for StopwatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotRunning => "E_STOPWATCH_NOT_RUNNING",
            Self::Ticker(_) => "E_TICKER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Stopped,
    Running,
}

/// A lap checkpoint: cumulative time and delta from the previous lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based sequence number.
    pub id: u32,
    pub time: u64,
    pub diff: u64,
}

/// Lap list, most recent first.
#[derive(Debug, Clone, Default)]
pub struct LapBook {
    laps: Vec<Lap>,
}

impl LapBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lap at cumulative time `time_ms` and return it.
    pub fn record(&mut self, time_ms: u64) -> Lap {
        let previous = self.laps.first().map_or(0, |lap| lap.time);
        let id = u32::try_from(self.laps.len() + 1).unwrap_or(u32::MAX);
        let lap = Lap { id, time: time_ms, diff: time_ms.saturating_sub(previous) };
        self.laps.insert(0, lap);
        lap
    }

    #[must_use]
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn clear(&mut self) {
        self.laps.clear();
    }
}

pub struct Stopwatch {
    /// Whole ticks from finished running segments.
    banked_ms: u64,
    started_at: Option<Instant>,
    /// Last value published by the ticker.
    live_ms: Arc<AtomicU64>,
    laps: LapBook,
    ticker: Option<RepeatingTask>,
}

/// Time since `started`, rounded down to whole ticks.
fn whole_ticks(started: Instant) -> u64 {
    let ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    ms - ms % TICK_MS
}

impl Stopwatch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            banked_ms: 0,
            started_at: None,
            live_ms: Arc::new(AtomicU64::new(0)),
            laps: LapBook::new(),
            ticker: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> StopwatchState {
        if self.started_at.is_some() { StopwatchState::Running } else { StopwatchState::Stopped }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == StopwatchState::Running
    }

    /// Total running time in whole ticks, current segment included.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.banked_ms.saturating_add(self.started_at.map_or(0, whole_ticks))
    }

    /// Elapsed time as of the most recent tick, for live rendering.
    #[must_use]
    pub fn display_ms(&self) -> u64 {
        self.live_ms.load(Ordering::Relaxed)
    }

    /// Laps, most recent first.
    #[must_use]
    pub fn laps(&self) -> &[Lap] {
        self.laps.laps()
    }

    /// Start ticking. No-op if already running.
    ///
    /// # Errors
    ///
    /// Fails when no tokio runtime is available.
    pub fn start(&mut self) -> Result<(), StopwatchError> {
        if self.started_at.is_some() {
            return Ok(());
        }
        let started = Instant::now();
        let banked = self.banked_ms;
        let live = self.live_ms.clone();
        let task = RepeatingTask::spawn(Duration::from_millis(TICK_MS), move || {
            live.store(banked.saturating_add(whole_ticks(started)), Ordering::Relaxed);
        })?;
        self.ticker = Some(task);
        self.started_at = Some(started);
        info!(elapsed_ms = self.banked_ms, "stopwatch: started");
        Ok(())
    }

    /// Stop ticking, keeping elapsed time and laps. No-op if stopped.
    pub fn stop(&mut self) {
        let Some(started) = self.started_at.take() else {
            return;
        };
        if let Some(mut task) = self.ticker.take() {
            task.cancel();
        }
        self.banked_ms = self.banked_ms.saturating_add(whole_ticks(started));
        self.live_ms.store(self.banked_ms, Ordering::Relaxed);
        info!(elapsed_ms = self.banked_ms, "stopwatch: stopped");
    }

    /// Flip between running and stopped. Returns the new state.
    ///
    /// # Errors
    ///
    /// Fails when starting and no tokio runtime is available.
    pub fn toggle(&mut self) -> Result<StopwatchState, StopwatchError> {
        if self.is_running() {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.state())
    }

    /// Record a lap at the current elapsed time.
    ///
    /// # Errors
    ///
    /// Returns [`StopwatchError::NotRunning`] when stopped.
    pub fn lap(&mut self) -> Result<Lap, StopwatchError> {
        if !self.is_running() {
            return Err(StopwatchError::NotRunning);
        }
        let lap = self.laps.record(self.elapsed_ms());
        debug!(id = lap.id, time = lap.time, diff = lap.diff, "stopwatch: lap");
        Ok(lap)
    }

    /// Stop, zero the elapsed time and clear laps.
    pub fn reset(&mut self) {
        self.stop();
        self.banked_ms = 0;
        self.live_ms.store(0, Ordering::Relaxed);
        self.laps.clear();
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Render milliseconds as `MM:SS.cc`.
#[must_use]
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

#[cfg(test)]
#[path = "stopwatch_test.rs"]
mod tests;
