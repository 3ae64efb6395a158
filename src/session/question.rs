use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillMode {
    #[default]
    Square,
    Cube,
    Percentage,
    Mixed,
}

impl DrillMode {
    /// Modes a single question can be drawn from.
    pub const SINGLE: [DrillMode; 3] = [DrillMode::Square, DrillMode::Cube, DrillMode::Percentage];

    pub fn as_str(self) -> &'static str {
        match self {
            DrillMode::Square => "square",
            DrillMode::Cube => "cube",
            DrillMode::Percentage => "percentage",
            DrillMode::Mixed => "mixed",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DrillMode::Square => "Squares",
            DrillMode::Cube => "Cubes",
            DrillMode::Percentage => "Percentages",
            DrillMode::Mixed => "Mixed Timed Drill",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" | "squares" => Some(DrillMode::Square),
            "cube" | "cubes" => Some(DrillMode::Cube),
            "percentage" | "percentages" | "percent" => Some(DrillMode::Percentage),
            "mixed" => Some(DrillMode::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for DrillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single drill question. Replaced wholesale when the session advances.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub prompt: String,
    pub expected_answer: f64,
    /// Drill that produced the question; under `Mixed` this is the chosen sub-type.
    pub mode: DrillMode,
}

impl Question {
    pub fn new(prompt: impl Into<String>, expected_answer: f64, mode: DrillMode) -> Self {
        Self {
            prompt: prompt.into(),
            expected_answer,
            mode,
        }
    }

    pub fn display_answer(&self) -> String {
        format_answer(self.expected_answer)
    }
}

/// Render an expected answer: whole values print as integers, anything else
/// as a decimal with at most two places.
pub fn format_answer(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(DrillMode::Square.display_name(), "Squares");
        assert_eq!(DrillMode::Cube.display_name(), "Cubes");
        assert_eq!(DrillMode::Percentage.display_name(), "Percentages");
        assert_eq!(DrillMode::Mixed.display_name(), "Mixed Timed Drill");
    }

    #[test]
    fn test_from_name_accepts_plural_and_case() {
        assert_eq!(DrillMode::from_name("Cubes"), Some(DrillMode::Cube));
        assert_eq!(DrillMode::from_name(" percentage "), Some(DrillMode::Percentage));
        assert_eq!(DrillMode::from_name("fractions"), None);
    }

    #[test]
    fn test_format_whole_answer_as_integer() {
        assert_eq!(format_answer(8.0), "8");
        assert_eq!(format_answer(2500.0), "2500");
        // float noise from percent arithmetic
        assert_eq!(format_answer(0.15 * 200.0), "30");
    }

    #[test]
    fn test_format_fractional_answer_keeps_decimals() {
        assert_eq!(format_answer(2.5), "2.5");
        assert_eq!(format_answer(41.66), "41.66");
        assert_eq!(format_answer(0.125 * 12.0), "1.5");
    }
}
