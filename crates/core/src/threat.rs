//! Sensor-based threat assessment
//!
//! Turns one set of gas, temperature and humidity readings into a risk score
//! in [0, 1], a discrete risk level, and per-sensor alert flags. The score is
//! a weighted blend of the worst normalized gas reading (70%) and the
//! temperature excess above the high threshold (30%), raised to the high
//! cut-off whenever any reading is already past its alarm threshold.

use crate::config::{RiskThresholds, SensorThresholds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gas readings are capped at this multiple of their threshold
pub const MAX_GAS_FACTOR: f64 = 2.0;
/// Degrees above the high temperature threshold that saturate the temperature factor
pub const TEMPERATURE_SPAN_C: f64 = 10.0;
/// Weight of the worst gas factor in the score
pub const GAS_WEIGHT: f64 = 0.7;
/// Weight of the temperature factor in the score
pub const TEMPERATURE_WEIGHT: f64 = 0.3;

/// One set of sensor readings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorReadings {
    /// MQ-2 reading (ppm)
    pub mq2: f64,
    /// MQ-4 reading (ppm)
    pub mq4: f64,
    /// MQ-6 reading (ppm)
    pub mq6: f64,
    /// MQ-8 reading (ppm)
    pub mq8: f64,
    /// Ambient temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
}

impl SensorReadings {
    fn gases(&self, thresholds: &SensorThresholds) -> [(f64, f64); 4] {
        [
            (self.mq2, thresholds.mq2),
            (self.mq4, thresholds.mq4),
            (self.mq6, thresholds.mq6),
            (self.mq8, thresholds.mq8),
        ]
    }
}

/// Discrete risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Below the low cut-off
    Safe,
    /// At or above the low cut-off
    Low,
    /// At or above the medium cut-off
    Medium,
    /// At or above the high cut-off
    High,
}

impl RiskLevel {
    /// Level for a score against the configured cut-offs
    #[must_use]
    pub fn from_score(score: f64, thresholds: &RiskThresholds) -> Self {
        if score >= thresholds.high {
            RiskLevel::High
        } else if score >= thresholds.medium {
            RiskLevel::Medium
        } else if score >= thresholds.low {
            RiskLevel::Low
        } else {
            RiskLevel::Safe
        }
    }

    /// Fixed operator guidance for this level
    #[must_use]
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &[
                "Evacuate all personnel immediately",
                "Activate emergency response team",
                "Notify authorities",
            ],
            RiskLevel::Medium => &[
                "Prepare for possible evacuation",
                "Activate monitoring systems",
                "Alert emergency response team",
            ],
            RiskLevel::Low => &[
                "Increase monitoring frequency",
                "Check equipment for malfunctions",
            ],
            RiskLevel::Safe => &["Continue normal operations"],
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-sensor alert flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    /// Within threshold
    #[default]
    Normal,
    /// Past threshold
    Alert,
}

impl AlertState {
    fn exceeds(value: f64, threshold: f64) -> Self {
        if value > threshold {
            AlertState::Alert
        } else {
            AlertState::Normal
        }
    }
}

/// Alert flag for every sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorStatus {
    pub mq2: AlertState,
    pub mq4: AlertState,
    pub mq6: AlertState,
    pub mq8: AlertState,
    pub temperature: AlertState,
    pub humidity: AlertState,
}

impl SensorStatus {
    /// True when any sensor is in alert
    #[must_use]
    pub fn any_alert(&self) -> bool {
        [
            self.mq2,
            self.mq4,
            self.mq6,
            self.mq8,
            self.temperature,
            self.humidity,
        ]
        .contains(&AlertState::Alert)
    }
}

/// Result of one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatAssessment {
    /// Blended score, clamped to [0, 1]
    pub risk_score: f64,
    /// Level derived from the unclamped score
    pub risk_level: RiskLevel,
    /// Operator guidance for `risk_level`
    pub recommendations: Vec<String>,
    /// Per-sensor flags
    pub sensor_status: SensorStatus,
}

/// Score a set of readings
///
/// Non-finite readings compare false against every threshold and therefore
/// never raise an alert on their own.
#[must_use]
pub fn assess_threat(
    readings: &SensorReadings,
    sensors: &SensorThresholds,
    risk: &RiskThresholds,
) -> ThreatAssessment {
    let gases = readings.gases(sensors);

    let immediate_danger = gases.iter().any(|&(value, threshold)| value > threshold)
        || readings.temperature > sensors.temperature_high;

    let gas_factor = gases
        .iter()
        .map(|&(value, threshold)| (value / threshold).min(MAX_GAS_FACTOR))
        .filter(|f| f.is_finite())
        .fold(0.0_f64, f64::max);

    let temperature_factor = if readings.temperature > sensors.temperature_high {
        ((readings.temperature - sensors.temperature_high) / TEMPERATURE_SPAN_C).min(1.0)
    } else {
        0.0
    };

    let mut score = GAS_WEIGHT * gas_factor + TEMPERATURE_WEIGHT * temperature_factor;
    if immediate_danger {
        score = score.max(risk.high);
    }

    let risk_level = RiskLevel::from_score(score, risk);

    ThreatAssessment {
        risk_score: score.clamp(0.0, 1.0),
        risk_level,
        recommendations: risk_level
            .recommendations()
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
        sensor_status: SensorStatus {
            mq2: AlertState::exceeds(readings.mq2, sensors.mq2),
            mq4: AlertState::exceeds(readings.mq4, sensors.mq4),
            mq6: AlertState::exceeds(readings.mq6, sensors.mq6),
            mq8: AlertState::exceeds(readings.mq8, sensors.mq8),
            temperature: AlertState::exceeds(readings.temperature, sensors.temperature_high),
            humidity: AlertState::exceeds(readings.humidity, sensors.humidity_high),
        },
    }
}
