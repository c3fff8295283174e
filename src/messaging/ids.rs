//! Timestamp-derived ids (`m<millis>`, `l<millis>`, `sl<millis>`).
//!
//! Ids share one process-wide clock. When two ids are requested within the
//! same millisecond the later one is bumped past the last issued value, so
//! ids never repeat for the life of the process.

use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ISSUED_MS: AtomicI64 = AtomicI64::new(0);

pub const MESSAGE_PREFIX: &str = "m";
pub const LABEL_PREFIX: &str = "l";
pub const SUB_LABEL_PREFIX: &str = "sl";

/// Next unique millisecond stamp, never below the wall clock.
pub fn next_stamp() -> i64 {
    let now = crate::now_ms();
    let mut last = LAST_ISSUED_MS.load(Ordering::Relaxed);
    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_ISSUED_MS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

#[must_use]
pub fn next_id(prefix: &str) -> String {
    format!("{prefix}{}", next_stamp())
}

#[cfg(test)]
#[path = "ids_test.rs"]
mod tests;
