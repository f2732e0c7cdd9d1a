use super::require_finite;
use crate::error::PharmacalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

const ABSOLUTE_ZERO_C: f64 = -273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn from_str_loose(s: &str) -> Option<TemperatureUnit> {
        match s.trim().trim_start_matches('°').to_lowercase().as_str() {
            "c" | "celsius" => Some(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
            _ => None,
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value + ABSOLUTE_ZERO_C,
        }
    }

    fn express(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius - ABSOLUTE_ZERO_C,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Celsius => write!(f, "°C"),
            TemperatureUnit::Fahrenheit => write!(f, "°F"),
            TemperatureUnit::Kelvin => write!(f, "K"),
        }
    }
}

/// Convert a temperature between Celsius, Fahrenheit and Kelvin.
///
/// Values below absolute zero are rejected.
pub fn convert(
    value: f64,
    from: TemperatureUnit,
    to: TemperatureUnit,
) -> Result<f64, PharmacalcError> {
    require_finite("temperature", value)?;
    let celsius = from.to_celsius(value);
    if celsius < ABSOLUTE_ZERO_C {
        return Err(PharmacalcError::invalid_input(
            "temperature",
            format!("{value} {from}"),
            "below absolute zero",
        ));
    }
    require_finite("converted temperature", to.express(celsius))
}
