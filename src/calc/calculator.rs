//! Keypad calculator: display buffer, error marker and bounded history.
//!
//! DESIGN
//! ======
//! Keys append tokens to a display string; `=` hands the whole string to the
//! expression evaluator. A failed evaluation shows [`ERROR_MARKER`] and the
//! next key press starts over from `"0"` before being applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CalcError, evaluate, format_number};

/// Maximum number of history entries kept, most recent first.
pub const HISTORY_LIMIT: usize = 10;

/// Display text shown after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// Keypad labels in layout order.
pub const KEYPAD: &[&str] = &[
    "C", "(", ")", "del", //
    "sin", "cos", "tan", "/", //
    "log", "7", "8", "9", "*", //
    "sqrt", "4", "5", "6", "-", //
    "^", "1", "2", "3", "+", //
    "pi", "0", ".", "=",
];

const FUNCTION_KEYS: &[&str] = &["sin", "cos", "tan", "log", "sqrt"];

/// A single key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Clear,
    Delete,
    Equals,
    /// A function key; appends `name(`.
    Function(String),
    /// Digits, operators, parens and constants; appended verbatim.
    Append(String),
}

impl Key {
    /// Map a keypad label to its key.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "C" => Self::Clear,
            "del" => Self::Delete,
            "=" => Self::Equals,
            f if FUNCTION_KEYS.contains(&f) => Self::Function(f.to_owned()),
            other => Self::Append(other.to_owned()),
        }
    }
}

/// One successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
    pub timestamp: i64,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    history: Vec<HistoryEntry>,
    error: Option<CalcError>,
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self { display: "0".into(), history: Vec::new(), error: None }
    }

    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// History entries, most recent first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error from the last failed evaluation, until the next key press.
    #[must_use]
    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Apply a key press.
    pub fn press(&mut self, key: Key) {
        if self.error.take().is_some() {
            self.display = "0".into();
        }

        match key {
            Key::Clear => self.display = "0".into(),
            Key::Delete => {
                if self.display.chars().count() > 1 {
                    self.display.pop();
                } else {
                    self.display = "0".into();
                }
            }
            Key::Function(name) => self.append(&format!("{name}(")),
            Key::Equals => self.equals(),
            Key::Append(token) => self.append(&token),
        }
    }

    /// Press the key with the given keypad label.
    pub fn press_label(&mut self, label: &str) {
        self.press(Key::from_label(label));
    }

    /// Replace the display with `expression` and evaluate it.
    pub fn submit(&mut self, expression: &str) {
        self.error = None;
        self.display = expression.to_owned();
        self.equals();
    }

    fn append(&mut self, token: &str) {
        if self.display == "0" {
            token.clone_into(&mut self.display);
        } else {
            self.display.push_str(token);
        }
    }

    fn equals(&mut self) {
        match evaluate(&self.display) {
            Ok(value) => {
                let result = format_number(value);
                let entry =
                    HistoryEntry { expression: self.display.clone(), result: result.clone(), timestamp: crate::now_ms() };
                debug!(expression = %entry.expression, result = %entry.result, "calculator: evaluated");
                self.history.insert(0, entry);
                self.history.truncate(HISTORY_LIMIT);
                self.display = result;
            }
            Err(e) => {
                debug!(expression = %self.display, error = %e, "calculator: evaluation failed");
                self.display = ERROR_MARKER.into();
                self.error = Some(e);
            }
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
