//! OmniConnect core: business-messaging model and calculator utilities.
//!
//! ARCHITECTURE
//! ============
//! Two independent domains share this crate:
//!
//! - `messaging`: chats, labels, users and messages behind a swappable
//!   repository, plus chat-list filtering, label assignment and voice notes.
//! - `calc`, `stopwatch`, `convert`, `solver`: the calculator app cores.
//!
//! `ticker` provides the cancellable repeating task both domains use for
//! timed updates. `storage` and `settings` emulate the browser's local
//! storage for persisted preferences. `llm` is the outbound text-generation
//! client used by the solver.

pub mod calc;
pub mod convert;
pub mod error;
pub mod llm;
pub mod messaging;
pub mod settings;
pub mod solver;
pub mod stopwatch;
pub mod storage;
pub mod ticker;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in Unix milliseconds (0 if the clock is before the epoch).
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
