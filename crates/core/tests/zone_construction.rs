use hazard_zone_core::dispersion::gaussian_plume;
use hazard_zone_core::geodesy::{haversine_distance, initial_bearing};
use hazard_zone_core::zones::{circle_zone, default_zone_set, ellipse_zone, ZONE_VERTEX_COUNT};
use hazard_zone_core::{
    Degrees, DispersionModel, ExplosionParameters, GeoPoint, Meters, Severity, WindField,
    ZoneBuilder, ZonePolygon,
};

#[ctor::ctor]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const SOURCE: GeoPoint = GeoPoint::new(51.5072, -0.1276);

fn farthest(ring: &ZonePolygon) -> (f64, GeoPoint) {
    ring.vertices()
        .iter()
        .map(|v| {
            let p = GeoPoint::from(*v);
            (*haversine_distance(SOURCE, p), p)
        })
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap()
}

#[test]
fn test_circle_fidelity() {
    for radius in [25.0, 100.0, 750.0, 4000.0] {
        let ring = circle_zone(SOURCE, Meters::new(radius));
        assert_eq!(ring.distinct_vertices().count(), ZONE_VERTEX_COUNT);
        assert_eq!(ring.vertices().first(), ring.vertices().last());

        for v in ring.distinct_vertices() {
            let d = *haversine_distance(SOURCE, GeoPoint::from(*v));
            assert!((d - radius).abs() / radius < 0.005, "radius {radius}: vertex at {d}");
        }
    }
}

#[test]
fn test_plume_ellipse_follows_the_wind() {
    for wind in [0.0, 45.0, 90.0, 180.0, 300.0] {
        let geometry = gaussian_plume::plume_geometry(4000.0, 3.0);
        let ring = ellipse_zone(
            SOURCE,
            Meters::new(geometry.plume_length),
            Meters::new(geometry.plume_width),
            Degrees::new(wind),
        );

        let (reach, far) = farthest(&ring);
        assert!((reach - geometry.plume_length).abs() / geometry.plume_length < 0.005);
        assert!(
            initial_bearing(SOURCE, far).angular_distance(Degrees::new(wind)) <= 10.0,
            "wind {wind}: farthest vertex at {}",
            initial_bearing(SOURCE, far)
        );
    }
}

#[test]
fn test_combined_zone_contains_every_component() {
    let wind = WindField::new(2.5, 135.0);
    let dispersion = DispersionModel::default().predict(3000.0, &wind);
    let zones = ZoneBuilder::default()
        .build(
            SOURCE,
            &ExplosionParameters::default(),
            &dispersion.geometry(),
            wind.direction,
        )
        .unwrap();

    for severity in Severity::ALL {
        let (combined, _) = farthest(zones.combined_threat_zones.get(severity));
        let (blast, _) = farthest(zones.blast_zones.get(severity));
        let (plume, _) = farthest(zones.dispersion_zones.get(severity));
        assert!(combined + 1.0 >= blast.max(plume), "{severity}: {combined} < {blast}/{plume}");
    }
}

#[test]
fn test_default_set_uses_fixed_radii() {
    let zones = default_zone_set(SOURCE);
    assert!(zones.is_fallback);

    for collection in [
        &zones.blast_zones,
        &zones.thermal_zones,
        &zones.dispersion_zones,
        &zones.combined_threat_zones,
    ] {
        for (severity, expected) in [
            (Severity::High, 100.0),
            (Severity::Medium, 200.0),
            (Severity::Low, 300.0),
        ] {
            let ring = collection.get(severity);
            for v in ring.distinct_vertices() {
                let d = *haversine_distance(SOURCE, GeoPoint::from(*v));
                assert!((d - expected).abs() < 0.5, "{severity}: {d}");
            }
        }
    }
}

#[test]
fn test_nan_radius_produces_fallback() {
    let mut params: ExplosionParameters = serde_json::from_str(
        r#"{"energy_release": 500.0, "distance_to_overpressure": {"15kPa": 40.0, "7kPa": 90.0, "3kPa": 180.0}}"#,
    )
    .unwrap();
    params.distance_to_overpressure.insert("3kPa", f64::NAN);

    let geometry = gaussian_plume::plume_geometry(500.0, 4.0);
    let zones = ZoneBuilder::default().build_or_default(SOURCE, &params, &geometry, Degrees::new(0.0));

    assert!(zones.is_fallback);
    assert_eq!(zones, default_zone_set(SOURCE));
}
