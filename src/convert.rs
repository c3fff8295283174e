//! Temperature conversion between Celsius, Fahrenheit and Kelvin.
//!
//! Every conversion goes through Celsius.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [Self; 3] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
            Self::Kelvin => "Kelvin",
        };
        write!(f, "{name} ({})", self.symbol())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown temperature unit '{0}' (expected celsius, fahrenheit or kelvin)")]
pub struct UnknownUnit(pub String);

impl FromStr for TemperatureUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('°').to_ascii_lowercase();
        match normalized.as_str() {
            "c" | "celsius" => Ok(Self::Celsius),
            "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            "k" | "kelvin" => Ok(Self::Kelvin),
            _ => Err(UnknownUnit(s.to_owned())),
        }
    }
}

/// Convert `value` from one unit to another.
#[must_use]
pub fn convert(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    let celsius = match from {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * (5.0 / 9.0),
        TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
    };

    match to {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
    }
}

/// Short formula text for a unit pair.
#[must_use]
pub fn formula(from: TemperatureUnit, to: TemperatureUnit) -> &'static str {
    use TemperatureUnit::{Celsius, Fahrenheit, Kelvin};
    match (from, to) {
        (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => "No change.",
        (Celsius, Fahrenheit) => "(°C × 9/5) + 32",
        (Fahrenheit, Celsius) => "(°F − 32) × 5/9",
        (Celsius, Kelvin) => "°C + 273.15",
        (Kelvin, Celsius) => "K − 273.15",
        (Fahrenheit, Kelvin) => "(°F − 32) × 5/9 + 273.15",
        (Kelvin, Fahrenheit) => "(K − 273.15) × 9/5 + 32",
    }
}

/// Parse free-form input leniently: the longest numeric prefix wins, and
/// anything unparsable (including empty input) reads as `0`.
#[must_use]
pub fn parse_temperature_input(raw: &str) -> f64 {
    let text = raw.trim_start();
    let mut best = 0.0;
    for (idx, ch) in text.char_indices() {
        if !(ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E')) {
            break;
        }
        let end = idx + ch.len_utf8();
        if let Ok(value) = text[..end].parse::<f64>() {
            best = value;
        }
    }
    if best.is_finite() { best } else { 0.0 }
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
