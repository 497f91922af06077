//! Configuration loading and typed config structures
//!
//! Every section has defaults matching the deployed sensor service, so an
//! empty JSON object is a complete configuration. Values can be overridden
//! per field from the environment with [`HazardConfig::with_env_overrides`].
//!
//! # Environment variables
//!
//! | Variable | Field |
//! |---|---|
//! | `THRESHOLD_MQ2`, `THRESHOLD_MQ4`, `THRESHOLD_MQ6`, `THRESHOLD_MQ8` | gas thresholds (ppm) |
//! | `THRESHOLD_TEMP_LOW`, `THRESHOLD_TEMP_HIGH` | temperature band (°C) |
//! | `THRESHOLD_HUMIDITY_LOW`, `THRESHOLD_HUMIDITY_HIGH` | humidity band (%) |
//! | `ZONE_HIGH_THRESHOLD`, `ZONE_MEDIUM_THRESHOLD`, `ZONE_LOW_THRESHOLD` | risk level cut-offs |
//! | `ZONE_TRIGGER_SCORE` | risk score above which zones are computed |
//! | `ROUTE_PROJECTION` | `planar` or `geodesic` |

use crate::core_types::SeverityMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse JSON content
    #[error("failed to parse config JSON: {source}")]
    Json {
        /// The underlying parse error
        #[from]
        source: serde_json::Error,
    },

    /// An environment override could not be parsed
    #[error("environment variable {name}={value:?} is not valid")]
    Env {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HazardConfig {
    /// Per-sensor alert thresholds
    #[serde(default)]
    pub sensors: SensorThresholds,

    /// Risk-level cut-offs
    #[serde(default)]
    pub risk: RiskThresholds,

    /// Zone defaults
    #[serde(default)]
    pub zones: ZoneConfig,

    /// Evacuation route placement
    #[serde(default)]
    pub routes: RouteConfig,
}

impl HazardConfig {
    /// Load and validate configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Json`] if the content is not valid JSON, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] or [`ConfigError::Invalid`].
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// [`ConfigError::Env`] for unparseable values, [`ConfigError::Invalid`]
    /// when the result fails validation.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production)
    ///
    /// # Errors
    ///
    /// Same as [`HazardConfig::with_env_overrides`].
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let number = |name: &'static str, target: &mut f64| -> Result<(), ConfigError> {
            if let Some(value) = lookup(name) {
                *target = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Env { name, value })?;
            }
            Ok(())
        };

        let s = &mut self.sensors;
        number("THRESHOLD_MQ2", &mut s.mq2)?;
        number("THRESHOLD_MQ4", &mut s.mq4)?;
        number("THRESHOLD_MQ6", &mut s.mq6)?;
        number("THRESHOLD_MQ8", &mut s.mq8)?;
        number("THRESHOLD_TEMP_LOW", &mut s.temperature_low)?;
        number("THRESHOLD_TEMP_HIGH", &mut s.temperature_high)?;
        number("THRESHOLD_HUMIDITY_LOW", &mut s.humidity_low)?;
        number("THRESHOLD_HUMIDITY_HIGH", &mut s.humidity_high)?;

        let r = &mut self.risk;
        number("ZONE_HIGH_THRESHOLD", &mut r.high)?;
        number("ZONE_MEDIUM_THRESHOLD", &mut r.medium)?;
        number("ZONE_LOW_THRESHOLD", &mut r.low)?;
        number("ZONE_TRIGGER_SCORE", &mut r.zone_trigger)?;

        if let Some(value) = lookup("ROUTE_PROJECTION") {
            self.routes.projection = match value.trim().to_ascii_lowercase().as_str() {
                "planar" => RouteProjection::Planar,
                "geodesic" => RouteProjection::Geodesic,
                _ => {
                    return Err(ConfigError::Env {
                        name: "ROUTE_PROJECTION",
                        value,
                    })
                }
            };
        }

        self.validate()?;
        Ok(self)
    }

    /// Check ranges and ordering
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.sensors;
        for (name, value) in [
            ("sensors.mq2", s.mq2),
            ("sensors.mq4", s.mq4),
            ("sensors.mq6", s.mq6),
            ("sensors.mq8", s.mq8),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !strictly_below(s.temperature_low, s.temperature_high) {
            return Err(ConfigError::Invalid(format!(
                "sensors.temperature_low ({}) must be below temperature_high ({})",
                s.temperature_low, s.temperature_high
            )));
        }
        if !strictly_below(s.humidity_low, s.humidity_high) {
            return Err(ConfigError::Invalid(format!(
                "sensors.humidity_low ({}) must be below humidity_high ({})",
                s.humidity_low, s.humidity_high
            )));
        }

        let r = &self.risk;
        let ordered = r.low >= 0.0
            && strictly_below(r.low, r.medium)
            && strictly_below(r.medium, r.high)
            && r.high <= 1.0;
        if !ordered {
            return Err(ConfigError::Invalid(format!(
                "risk thresholds must satisfy 0 <= low < medium < high <= 1, got {}/{}/{}",
                r.low, r.medium, r.high
            )));
        }
        if !(0.0..=1.0).contains(&r.zone_trigger) {
            return Err(ConfigError::Invalid(format!(
                "risk.zone_trigger must be in [0, 1], got {}",
                r.zone_trigger
            )));
        }

        self.zones.validate()
    }
}

fn strictly_below(a: f64, b: f64) -> bool {
    a.partial_cmp(&b) == Some(Ordering::Less)
}

/// Per-sensor alert thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorThresholds {
    /// MQ-2 (LPG, propane, smoke) threshold (ppm)
    pub mq2: f64,
    /// MQ-4 (methane) threshold (ppm)
    pub mq4: f64,
    /// MQ-6 (LPG, butane) threshold (ppm)
    pub mq6: f64,
    /// MQ-8 (hydrogen) threshold (ppm)
    pub mq8: f64,
    /// Lower temperature bound (°C)
    pub temperature_low: f64,
    /// Upper temperature bound (°C); readings above it are dangerous
    pub temperature_high: f64,
    /// Lower humidity bound (%)
    pub humidity_low: f64,
    /// Upper humidity bound (%)
    pub humidity_high: f64,
}

impl Default for SensorThresholds {
    fn default() -> Self {
        Self {
            mq2: 1000.0,
            mq4: 1000.0,
            mq6: 1000.0,
            mq8: 1000.0,
            temperature_low: 10.0,
            temperature_high: 50.0,
            humidity_low: 20.0,
            humidity_high: 80.0,
        }
    }
}

/// Risk-score cut-offs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Score at or above which risk is high
    pub high: f64,
    /// Score at or above which risk is medium
    pub medium: f64,
    /// Score at or above which risk is low
    pub low: f64,
    /// Score above which dispersion, zones and routes are computed
    pub zone_trigger: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 0.8,
            medium: 0.5,
            low: 0.2,
            zone_trigger: 0.5,
        }
    }
}

/// Zone construction defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Blast radius per tier when the overpressure table lacks a key (m)
    pub default_blast_radii: SeverityMap<f64>,
    /// Thermal radius per tier when the radiation table lacks a key (m)
    pub default_thermal_radii: SeverityMap<f64>,
    /// Fraction of the plume axes used for each dispersion tier
    pub dispersion_scales: SeverityMap<f64>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            default_blast_radii: SeverityMap::new(100.0, 200.0, 300.0),
            default_thermal_radii: SeverityMap::new(100.0, 200.0, 300.0),
            dispersion_scales: SeverityMap::new(0.3, 0.6, 1.0),
        }
    }
}

impl ZoneConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (table, map) in [
            ("zones.default_blast_radii", &self.default_blast_radii),
            ("zones.default_thermal_radii", &self.default_thermal_radii),
            ("zones.dispersion_scales", &self.dispersion_scales),
        ] {
            for (severity, &value) in map.iter() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "{table}.{severity} must be a positive number, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// How evacuation route points are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteProjection {
    /// Small-angle flat-Earth offsets (111.32 km per degree)
    #[default]
    Planar,
    /// Spherical direct solution, same as zone rings
    Geodesic,
}

/// Evacuation route settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Point placement method
    pub projection: RouteProjection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: FxHashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = HazardConfig::parse("{}").unwrap();
        assert_eq!(config, HazardConfig::default());
        assert_eq!(config.sensors.mq2, 1000.0);
        assert_eq!(config.risk.zone_trigger, 0.5);
        assert_eq!(config.zones.default_blast_radii.low, 300.0);
        assert_eq!(config.routes.projection, RouteProjection::Planar);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = HazardConfig::parse(
            r#"{"sensors": {"mq4": 500}, "routes": {"projection": "geodesic"}}"#,
        )
        .unwrap();
        assert_eq!(config.sensors.mq4, 500.0);
        assert_eq!(config.sensors.mq2, 1000.0);
        assert_eq!(config.routes.projection, RouteProjection::Geodesic);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            HazardConfig::parse(r#"{"sensors": {"mq2": 0}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HazardConfig::parse(r#"{"risk": {"high": 0.4}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HazardConfig::parse(r#"{"zones": {"dispersion_scales": {"high": -1, "medium": 0.6, "low": 1}}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HazardConfig::parse("not json"),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_overrides_apply() {
        let config = HazardConfig::default()
            .with_overrides(lookup(&[
                ("THRESHOLD_MQ8", "250"),
                ("ZONE_TRIGGER_SCORE", " 0.3 "),
                ("ROUTE_PROJECTION", "Geodesic"),
            ]))
            .unwrap();
        assert_eq!(config.sensors.mq8, 250.0);
        assert_eq!(config.risk.zone_trigger, 0.3);
        assert_eq!(config.routes.projection, RouteProjection::Geodesic);
    }

    #[test]
    fn test_bad_override_is_reported() {
        let err = HazardConfig::default()
            .with_overrides(lookup(&[("THRESHOLD_TEMP_HIGH", "hot")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Env {
                name: "THRESHOLD_TEMP_HIGH",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            HazardConfig::from_file(Path::new("/nonexistent/hazard.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
