//! Stable error codes shared by every module's error enum.

/// Grepable error code and retryable flag, printed by the CLI next to the
/// human-readable message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// `[E_CODE] message` rendering used for terminal output.
pub fn describe(err: &(impl ErrorCode + ?Sized)) -> String {
    format!("[{}] {err}", err.error_code())
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
