//! Unit conversion utilities
//!
//! Geometry is always held in millimetres. These helpers format and parse
//! lengths for display in either metric or imperial units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system used for dimension display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

impl MeasurementSystem {
    /// Unit label ("mm" or "in")
    pub fn label(self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }

    /// Converts millimetres into this system's unit.
    pub fn from_mm(self, value_mm: f64) -> f64 {
        match self {
            Self::Metric => value_mm,
            Self::Imperial => value_mm / MM_PER_INCH,
        }
    }

    /// Converts a value in this system's unit into millimetres.
    pub fn to_mm(self, value: f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Imperial => value * MM_PER_INCH,
        }
    }
}

/// Format a length with its unit label
///
/// Metric values use one decimal, imperial values three.
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.1} mm", value_mm),
        MeasurementSystem::Imperial => format!("{:.3} in", value_mm / MM_PER_INCH),
    }
}

/// Format a width × height pair, e.g. "30.0 × 20.0 mm"
pub fn format_size(width_mm: f64, height_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.1} × {:.1} mm", width_mm, height_mm),
        MeasurementSystem::Imperial => format!(
            "{:.3} × {:.3} in",
            width_mm / MM_PER_INCH,
            height_mm / MM_PER_INCH
        ),
    }
}

/// Parse user input into millimetres
///
/// Accepts a bare number in the given system, or a number suffixed with
/// "mm" / "in" which overrides the system.
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    let (number, unit) = if let Some(n) = input.strip_suffix("mm") {
        (n, MeasurementSystem::Metric)
    } else if let Some(n) = input.strip_suffix("in") {
        (n, MeasurementSystem::Imperial)
    } else {
        (input, system)
    };

    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid length '{}': {}", input, e))?;
    if !value.is_finite() {
        return Err(format!("Invalid length '{}'", input));
    }
    Ok(unit.to_mm(value))
}
