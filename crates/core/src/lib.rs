//! Hazard Zone Core Library
//!
//! Geospatial hazard modelling for accidental gas releases. Given a release
//! point, a surface wind and an explosion estimate, the crate produces:
//!
//! - A Gaussian-plume dispersion estimate with Pasquill-Gifford stability
//! - Blast, thermal and dispersion hazard polygons per severity tier, plus
//!   their per-tier union
//! - Three evacuation routes oriented against the wind
//!
//! ## Components
//!
//! - [`geodesy`]: haversine distance and the spherical direct solution
//! - [`atmosphere`]: stability classification and σy/σz coefficients
//! - [`dispersion`]: closed-form plume with an injectable learned estimator
//! - [`zones`]: ring construction, union and catastrophic fallback
//! - [`evacuation`]: crosswind and upwind route polylines
//! - [`threat`]: sensor-reading risk assessment
//! - [`pipeline`]: all of the above behind one call
//!
//! ## Coordinate order
//!
//! Zone rings serialize `[longitude, latitude]`; evacuation routes serialize
//! `[latitude, longitude]`. The two vertex types are distinct
//! ([`ZoneVertex`], [`RouteVertex`]) and convert through [`GeoPoint`].

// Core types and utilities
pub mod core_types;

pub mod atmosphere;
pub mod config;
pub mod dispersion;
pub mod error;
pub mod evacuation;
pub mod geodesy;
pub mod pipeline;
pub mod threat;
pub mod zones;

// Re-export core types
pub use core_types::{Degrees, Kilometers, Meters, MetersPerSecond};
pub use core_types::{GeoPoint, RouteVertex, SourceLocation, ZoneVertex};
pub use core_types::{Severity, SeverityMap, WindField};

pub use atmosphere::{DispersionCoefficients, StabilityClass};
pub use config::{ConfigError, HazardConfig, RouteProjection};
pub use dispersion::{
    DispersionEstimator, DispersionModel, DispersionResult, Estimate, ModelError, PlumeGeometry,
};
pub use error::{HazardError, HazardResult};
pub use evacuation::{generate_evacuation_routes, EvacuationRoute, SafetyLevel};
pub use pipeline::{HazardPipeline, HazardReport, HazardRequest};
pub use threat::{assess_threat, RiskLevel, SensorReadings, ThreatAssessment};
pub use zones::{
    ExplosionParameters, GeometryError, HazardDistanceTable, ThreatZoneSet, ZoneBuilder,
    ZonePolygon,
};
