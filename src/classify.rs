use std::fmt;

use crate::reading::{Field, ReadingState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
}

impl AqiCategory {
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollutantStatus {
    Normal,
    High,
}

impl fmt::Display for PollutantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollutantStatus::Normal => f.write_str("✓ Normal"),
            PollutantStatus::High => f.write_str("⚠ High"),
        }
    }
}

/// Pollutants shown on the dashboard, each with a fixed safe limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pollutant {
    Co2,
    Co,
    O3,
    Voc,
    Pm25,
}

impl Pollutant {
    pub const ALL: [Pollutant; 5] = [
        Pollutant::Co2,
        Pollutant::Co,
        Pollutant::O3,
        Pollutant::Voc,
        Pollutant::Pm25,
    ];

    pub fn safe_limit(self) -> f64 {
        match self {
            Pollutant::Co2 => 1000.0,
            Pollutant::Co => 9.0,
            Pollutant::O3 => 70.0,
            Pollutant::Voc => 220.0,
            Pollutant::Pm25 => 35.0,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Co2 | Pollutant::Co => "ppm",
            Pollutant::O3 | Pollutant::Voc => "ppb",
            Pollutant::Pm25 => "µg/m³",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pollutant::Co2 => "CO₂",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O₃",
            Pollutant::Voc => "VOCs",
            Pollutant::Pm25 => "PM2.5",
        }
    }

    pub fn field(self) -> Field {
        match self {
            Pollutant::Co2 => Field::Co2,
            Pollutant::Co => Field::Co,
            Pollutant::O3 => Field::O3,
            Pollutant::Voc => Field::Voc,
            Pollutant::Pm25 => Field::Pm25,
        }
    }
}

/// A pollutant value paired with its classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    pub value: f64,
    pub status: PollutantStatus,
}

/// Thresholds are inclusive upper bounds.
pub fn classify_aqi(aqi: f64) -> AqiCategory {
    if aqi <= 50.0 {
        AqiCategory::Good
    } else if aqi <= 100.0 {
        AqiCategory::Moderate
    } else if aqi <= 150.0 {
        AqiCategory::UnhealthySensitive
    } else if aqi <= 200.0 {
        AqiCategory::Unhealthy
    } else {
        AqiCategory::VeryUnhealthy
    }
}

pub fn classify_pollutant(value: f64, safe_limit: f64) -> PollutantStatus {
    if value > safe_limit {
        PollutantStatus::High
    } else {
        PollutantStatus::Normal
    }
}

/// Naive short-term projection shown next to the current AQI.
pub fn predict_next_aqi(aqi: f64) -> i64 {
    (aqi * 1.05).floor() as i64
}

pub fn classify_pollutants(state: &ReadingState) -> Vec<PollutantReading> {
    Pollutant::ALL
        .iter()
        .map(|&pollutant| {
            let value = state.get(pollutant.field());
            PollutantReading {
                pollutant,
                value,
                status: classify_pollutant(value, pollutant.safe_limit()),
            }
        })
        .collect()
}
