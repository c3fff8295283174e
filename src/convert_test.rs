use super::*;

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

#[test]
fn celsius_to_fahrenheit_freezing_point() {
    assert_close(convert(0.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit), 32.0);
}

#[test]
fn celsius_to_kelvin_boiling_point() {
    assert_close(convert(100.0, TemperatureUnit::Celsius, TemperatureUnit::Kelvin), 373.15);
}

#[test]
fn fahrenheit_to_celsius() {
    assert_close(convert(212.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius), 100.0);
    assert_close(convert(-40.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius), -40.0);
}

#[test]
fn kelvin_to_fahrenheit() {
    assert_close(convert(0.0, TemperatureUnit::Kelvin, TemperatureUnit::Fahrenheit), -459.67);
}

#[test]
fn same_unit_is_identity() {
    for unit in TemperatureUnit::ALL {
        assert_close(convert(21.5, unit, unit), 21.5);
    }
}

#[test]
fn round_trip_all_unit_pairs() {
    let samples = [-273.15, -40.0, 0.0, 36.6, 100.0, 1234.5];
    for from in TemperatureUnit::ALL {
        for to in TemperatureUnit::ALL {
            for x in samples {
                let back = convert(convert(x, from, to), to, from);
                assert!((back - x).abs() < 1e-9, "{from} -> {to} -> {from} drifted: {x} vs {back}");
            }
        }
    }
}

#[test]
fn unit_parsing_accepts_names_and_symbols() {
    assert_eq!("c".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
    assert_eq!("°F".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
    assert_eq!(" Kelvin ".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Kelvin);
    assert!("rankine".parse::<TemperatureUnit>().is_err());
}

#[test]
fn formula_text_for_pairs() {
    assert_eq!(formula(TemperatureUnit::Celsius, TemperatureUnit::Celsius), "No change.");
    assert_eq!(formula(TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit), "(°C × 9/5) + 32");
    assert_eq!(formula(TemperatureUnit::Kelvin, TemperatureUnit::Celsius), "K − 273.15");
}

#[test]
fn lenient_input_parsing() {
    assert_close(parse_temperature_input("37.5"), 37.5);
    assert_close(parse_temperature_input("  -12abc"), -12.0);
    assert_close(parse_temperature_input("5e"), 5.0);
    assert_close(parse_temperature_input("1e2"), 100.0);
    assert_close(parse_temperature_input(""), 0.0);
    assert_close(parse_temperature_input("abc"), 0.0);
    assert_close(parse_temperature_input("-"), 0.0);
}

#[test]
fn display_includes_symbol() {
    assert_eq!(TemperatureUnit::Celsius.to_string(), "Celsius (°C)");
    assert_eq!(TemperatureUnit::Kelvin.to_string(), "Kelvin (K)");
}
