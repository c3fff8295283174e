//! Calculator engine: expression parsing and evaluation plus keypad state.
//!
//! Expressions are tokenized, parsed by recursive descent into an AST, and
//! evaluated over `f64` with IEEE semantics (division by zero yields
//! ±infinity; a NaN result is an error). `Calculator` layers the keypad
//! display, error marker and bounded history on top.

pub mod ast;
pub mod calculator;
pub mod eval;
pub mod format;
pub mod parse;
pub mod token;

pub use calculator::{Calculator, HistoryEntry, Key};
pub use eval::evaluate_expr;
pub use format::format_number;
pub use parse::parse;

/// Errors produced while tokenizing, parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("unexpected token {found} at {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("expression nested deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("expression longer than {max} tokens")]
    TooLong { max: usize },
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("function {name} expects {expected} argument(s), got {got}")]
    Arity { name: String, expected: &'static str, got: usize },
    #[error("result is not a real number")]
    NotANumber,
}

impl crate::error::ErrorCode for CalcError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_CALC_EMPTY",
            Self::UnexpectedChar { .. } | Self::InvalidNumber(_) => "E_CALC_LEX",
            Self::UnexpectedToken { .. } | Self::UnexpectedEnd | Self::UnbalancedParens => "E_CALC_SYNTAX",
            Self::UnknownSymbol(_) | Self::UnknownFunction(_) => "E_CALC_UNKNOWN_NAME",
            Self::Arity { .. } => "E_CALC_ARITY",
            Self::TooDeep { .. } | Self::TooLong { .. } => "E_CALC_LIMIT",
            Self::NotANumber => "E_CALC_NAN",
        }
    }
}

/// Parse and evaluate `input`, returning the numeric result.
///
/// # Errors
///
/// Returns a [`CalcError`] if the expression is malformed or evaluates to NaN.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let expr = parse(input)?;
    evaluate_expr(&expr)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
