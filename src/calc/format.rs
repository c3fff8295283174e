//! Result formatting compatible with JavaScript's `Number#toString`.

/// Render `value` the way the calculator display shows it.
///
/// Shortest round-trip digits; plain notation inside `[1e-6, 1e21)`, exponent
/// notation (`1e+21`, `1.5e-7`) outside it. Negative zero prints as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    if value == 0.0 {
        return "0".into();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let sci = format!("{value:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => sci,
    }
}
