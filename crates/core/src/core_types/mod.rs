//! Core types and utilities

pub mod geo_point;
pub mod severity;
pub mod units;
pub mod wind;

pub use geo_point::{GeoPoint, RouteVertex, SourceLocation, ZoneVertex};
pub use severity::{Severity, SeverityMap};
pub use units::*;
pub use wind::WindField;
