//! Tree-walking evaluator over `f64`.
//!
//! Division by zero follows IEEE-754 and yields ±infinity. `%` is a floored
//! modulo. Any NaN produced along the way surfaces as [`CalcError::NotANumber`].

use std::f64::consts;

use super::CalcError;
use super::ast::{BinaryOp, Expr, UnaryOp};

/// Evaluate a parsed expression.
///
/// # Errors
///
/// Returns a [`CalcError`] for unknown symbols or functions, wrong argument
/// counts, or a NaN result.
pub fn evaluate_expr(expr: &Expr) -> Result<f64, CalcError> {
    let value = eval(expr)?;
    if value.is_nan() {
        return Err(CalcError::NotANumber);
    }
    Ok(value)
}

fn eval(expr: &Expr) -> Result<f64, CalcError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Constant(name) => constant(name).ok_or_else(|| CalcError::UnknownSymbol(name.clone())),
        Expr::Unary { op, operand } => {
            let v = eval(operand)?;
            Ok(match op {
                UnaryOp::Plus => v,
                UnaryOp::Minus => -v,
            })
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = eval(lhs)?;
            let b = eval(rhs)?;
            Ok(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                BinaryOp::Rem => modulo(a, b),
                BinaryOp::Pow => a.powf(b),
            })
        }
        Expr::Call { name, args } => {
            let values = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            call(name, &values)
        }
    }
}

/// Floored modulo: the result takes the divisor's sign, and `x % 0` is `x`.
fn modulo(a: f64, b: f64) -> f64 {
    if b == 0.0 { a } else { a - b * (a / b).floor() }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(consts::PI),
        "e" | "E" => Some(consts::E),
        "tau" => Some(consts::TAU),
        _ => None,
    }
}

fn call(name: &str, args: &[f64]) -> Result<f64, CalcError> {
    // Two-argument `log(x, base)` is the only non-unary function.
    if name == "log" {
        return match args {
            [x] => Ok(x.ln()),
            [x, base] => Ok(x.ln() / base.ln()),
            _ => Err(CalcError::Arity { name: name.to_owned(), expected: "1 or 2", got: args.len() }),
        };
    }

    let f: fn(f64) -> f64 = match name {
        "sin" => f64::sin,
        "cos" => f64::cos,
        "tan" => f64::tan,
        "asin" => f64::asin,
        "acos" => f64::acos,
        "atan" => f64::atan,
        "sqrt" => f64::sqrt,
        "cbrt" => f64::cbrt,
        "abs" => f64::abs,
        "exp" => f64::exp,
        "ln" => f64::ln,
        "log10" => f64::log10,
        "log2" => f64::log2,
        "floor" => f64::floor,
        "ceil" => f64::ceil,
        "round" => f64::round,
        _ => return Err(CalcError::UnknownFunction(name.to_owned())),
    };

    match args {
        [x] => Ok(f(*x)),
        _ => Err(CalcError::Arity { name: name.to_owned(), expected: "1", got: args.len() }),
    }
}
