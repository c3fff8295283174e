//! Cancellable repeating task.
//!
//! DESIGN
//! ======
//! A `RepeatingTask` owns a spawned tokio task that calls a closure once per
//! period. The first call happens one full period after spawn; ticks missed
//! while the runtime was busy fire back to back. Cancelling aborts the task;
//! dropping the handle cancels it too, so a timer can never outlive the
//! component that started it.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Debug, thiserror::Error)]
pub enum TickerError {
    #[error("no tokio runtime available to drive the ticker")]
    NoRuntime,
    #[error("tick period must be non-zero")]
    ZeroPeriod,
}

impl crate::error::ErrorCode for TickerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoRuntime => "E_NO_RUNTIME",
            Self::ZeroPeriod => "E_ZERO_PERIOD",
        }
    }
}

pub struct RepeatingTask {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    /// Spawn `on_tick` to run every `period` on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TickerError::NoRuntime`] when called outside a tokio runtime
    /// and [`TickerError::ZeroPeriod`] for a zero period.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Result<Self, TickerError>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(TickerError::ZeroPeriod);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| TickerError::NoRuntime)?;

        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                on_tick();
            }
        });

        Ok(Self { period, handle: Some(handle) })
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// `true` until [`RepeatingTask::cancel`] is called.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop ticking. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "ticker_test.rs"]
mod tests;
