//! Zone set assembly and fallback

use super::geometry::{union_all, GeoBooleanOps, RingGeometry};
use super::polygon::ZonePolygon;
use super::shapes::{circle_zone, ellipse_zone};
use super::{ExplosionParameters, HazardDistanceTable, ThreatZoneSet, OVERPRESSURE_KEYS, RADIATION_KEYS};
use crate::config::ZoneConfig;
use crate::core_types::{Degrees, GeoPoint, Meters, Severity, SeverityMap};
use crate::dispersion::PlumeGeometry;
use crate::error::{HazardError, HazardResult};
use tracing::{debug, error, warn};

/// Radii of the catastrophic-fallback circles (m)
pub const FALLBACK_RADII: SeverityMap<f64> = SeverityMap::new(100.0, 200.0, 300.0);

/// Builds blast, thermal, dispersion and combined zones for a release
///
/// Generic over the ring-geometry backend so combination can be exercised
/// without the `geo` crate; production code uses [`ZoneBuilder::new`].
#[derive(Debug, Clone)]
pub struct ZoneBuilder<G: RingGeometry = GeoBooleanOps> {
    geometry: G,
    config: ZoneConfig,
}

impl Default for ZoneBuilder {
    fn default() -> Self {
        Self::new(ZoneConfig::default())
    }
}

impl ZoneBuilder {
    /// Builder using the `geo` boolean operations
    #[must_use]
    pub fn new(config: ZoneConfig) -> Self {
        Self::with_geometry(GeoBooleanOps, config)
    }
}

impl<G: RingGeometry> ZoneBuilder<G> {
    /// Builder with an explicit geometry backend
    pub fn with_geometry(geometry: G, config: ZoneConfig) -> Self {
        Self { geometry, config }
    }

    /// Zone defaults in use
    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    /// Blast radius per tier; missing keys take the configured default
    pub fn blast_radii(&self, params: &ExplosionParameters) -> SeverityMap<f64> {
        lookup_radii(
            &params.distance_to_overpressure,
            &OVERPRESSURE_KEYS,
            &self.config.default_blast_radii,
        )
    }

    /// Thermal radius per tier; missing keys take the configured default
    pub fn thermal_radii(&self, params: &ExplosionParameters) -> SeverityMap<f64> {
        lookup_radii(
            &params.distance_to_radiation,
            &RADIATION_KEYS,
            &self.config.default_thermal_radii,
        )
    }

    /// Union `first` with `rest`
    ///
    /// Never fails: when the backend rejects any ring, `first` is returned
    /// unmodified.
    pub fn combine(&self, first: &ZonePolygon, rest: &[&ZonePolygon]) -> ZonePolygon {
        match union_all(&self.geometry, first, rest) {
            Ok(combined) => combined,
            Err(e) => {
                warn!("Zone union failed: {}. Using the first ring unmodified.", e);
                first.clone()
            }
        }
    }

    /// Build every zone collection for a release
    ///
    /// # Arguments
    ///
    /// * `center` - Release point
    /// * `params` - Overpressure and radiation distance tables
    /// * `plume` - Plume length and width from the dispersion engine
    /// * `wind_direction` - Downwind bearing
    ///
    /// # Errors
    ///
    /// [`HazardError::InvalidExplosionParameters`] for a non-finite or
    /// negative radius or release energy, [`HazardError::InvalidPlume`] for
    /// a non-finite or negative plume axis.
    pub fn build(
        &self,
        center: GeoPoint,
        params: &ExplosionParameters,
        plume: &PlumeGeometry,
        wind_direction: Degrees,
    ) -> HazardResult<ThreatZoneSet> {
        if !params.energy_release.is_finite() || params.energy_release < 0.0 {
            return Err(HazardError::InvalidExplosionParameters {
                field: "energy_release".into(),
                value: params.energy_release,
            });
        }
        let blast = self.blast_radii(params);
        let thermal = self.thermal_radii(params);
        check_radii("distance_to_overpressure", &blast, &OVERPRESSURE_KEYS)?;
        check_radii("distance_to_radiation", &thermal, &RADIATION_KEYS)?;
        check_plume_axis("plume_length", plume.plume_length)?;
        check_plume_axis("plume_width", plume.plume_width)?;

        let blast_zones = blast.map(|r| circle_zone(center, Meters::new(r)));
        let thermal_zones = thermal.map(|r| circle_zone(center, Meters::new(r)));
        let scales = self.config.dispersion_scales;
        let dispersion_zones = SeverityMap::from_fn(|severity| {
            let scale = *scales.get(severity);
            ellipse_zone(
                center,
                Meters::new(plume.plume_length * scale),
                Meters::new(plume.plume_width * scale),
                wind_direction,
            )
        });

        let combined_threat_zones = SeverityMap::from_fn(|severity| {
            self.combine(
                blast_zones.get(severity),
                &[thermal_zones.get(severity), dispersion_zones.get(severity)],
            )
        });

        debug!(
            "Built zones at ({:.5}, {:.5}): blast {:?} m, thermal {:?} m, plume {:.0}x{:.0} m toward {}",
            center.latitude,
            center.longitude,
            blast,
            thermal,
            plume.plume_length,
            plume.plume_width,
            wind_direction
        );

        Ok(ThreatZoneSet {
            blast_zones,
            thermal_zones,
            dispersion_zones,
            combined_threat_zones,
            is_fallback: false,
        })
    }

    /// [`ZoneBuilder::build`], replacing any failure with [`default_zone_set`]
    pub fn build_or_default(
        &self,
        center: GeoPoint,
        params: &ExplosionParameters,
        plume: &PlumeGeometry,
        wind_direction: Degrees,
    ) -> ThreatZoneSet {
        match self.build(center, params, plume, wind_direction) {
            Ok(zones) => zones,
            Err(e) => {
                error!("Zone construction failed: {}. Returning default circular zones.", e);
                default_zone_set(center)
            }
        }
    }
}

/// Circles of [`FALLBACK_RADII`] in every collection, flagged as fallback
#[must_use]
pub fn default_zone_set(center: GeoPoint) -> ThreatZoneSet {
    let circles = FALLBACK_RADII.map(|r| circle_zone(center, Meters::new(r)));
    ThreatZoneSet {
        blast_zones: circles.clone(),
        thermal_zones: circles.clone(),
        dispersion_zones: circles.clone(),
        combined_threat_zones: circles,
        is_fallback: true,
    }
}

fn lookup_radii(
    table: &HazardDistanceTable,
    keys: &SeverityMap<&str>,
    defaults: &SeverityMap<f64>,
) -> SeverityMap<f64> {
    SeverityMap::from_fn(|severity| {
        table
            .get(keys.get(severity))
            .unwrap_or(*defaults.get(severity))
    })
}

fn check_radii(
    table: &str,
    radii: &SeverityMap<f64>,
    keys: &SeverityMap<&str>,
) -> HazardResult<()> {
    for (severity, &radius) in radii.iter() {
        if !radius.is_finite() || radius < 0.0 {
            return Err(HazardError::InvalidExplosionParameters {
                field: format!("{table}[{}]", keys.get(severity)),
                value: radius,
            });
        }
    }

    // Inner tiers are the most severe, so radii should grow outward
    if radii.high > radii.medium || radii.medium > radii.low {
        warn!(
            "{} radii do not grow from {} to {}: {:?}",
            table,
            Severity::High,
            Severity::Low,
            radii
        );
    }
    Ok(())
}

fn check_plume_axis(field: &'static str, value: f64) -> HazardResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HazardError::InvalidPlume { field, value })
    }
}
