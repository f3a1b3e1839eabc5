//! Geodesic area of a parcel boundary.
//!
//! The default model sums the spherical excess of the polar triangle formed
//! by each edge and the north pole on a sphere with the WGS 84 equatorial
//! radius. This is the formula web-map geometry libraries use, so areas
//! computed here agree with what a user sees in a browser map.

use agrimap_core::models::{Point, MIN_POLYGON_POINTS};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::models::to_geo_polygon;

/// Sphere radius used by the spherical model, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Earth model used for area computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EarthModel {
    /// Sphere of radius [`EARTH_RADIUS_METERS`]
    #[default]
    Sphere,
    /// WGS 84 ellipsoid (Karney's algorithm via the `geo` crate)
    Wgs84,
}

impl EarthModel {
    /// Signed area in square meters; counter-clockwise rings are positive
    pub fn signed_area(&self, points: &[Point]) -> f64 {
        if points.len() < MIN_POLYGON_POINTS {
            return 0.0;
        }

        match self {
            EarthModel::Sphere => spherical_signed_area(points, EARTH_RADIUS_METERS),
            EarthModel::Wgs84 => {
                use geo::GeodesicArea;
                to_geo_polygon(points).geodesic_area_signed()
            }
        }
    }

    /// Unsigned area in square meters
    pub fn area(&self, points: &[Point]) -> f64 {
        self.signed_area(points).abs()
    }
}

/// Area enclosed by `points` in square meters. Fewer than three points yield 0.
pub fn compute_area(points: &[Point]) -> f64 {
    EarthModel::Sphere.area(points)
}

/// Signed variant of [`compute_area`]
pub fn compute_signed_area(points: &[Point]) -> f64 {
    EarthModel::Sphere.signed_area(points)
}

/// Area enclosed by `points` in hectares
pub fn compute_area_hectares(points: &[Point]) -> f64 {
    square_meters_to_hectares(compute_area(points))
}

pub fn square_meters_to_hectares(square_meters: f64) -> f64 {
    square_meters / SQUARE_METERS_PER_HECTARE
}

fn spherical_signed_area(points: &[Point], radius: f64) -> f64 {
    let Some(last) = points.last() else {
        return 0.0;
    };

    let mut total = 0.0;
    let mut prev_tan_lat = colatitude_tan(last.lat);
    let mut prev_lng = last.lng.to_radians();

    for point in points {
        let tan_lat = colatitude_tan(point.lat);
        let lng = point.lng.to_radians();
        total += polar_triangle_area(tan_lat, lng, prev_tan_lat, prev_lng);
        prev_tan_lat = tan_lat;
        prev_lng = lng;
    }

    total * radius * radius
}

/// tan of half the colatitude
fn colatitude_tan(lat_degrees: f64) -> f64 {
    ((FRAC_PI_2 - lat_degrees.to_radians()) / 2.0).tan()
}

/// Signed spherical excess of the triangle (pole, p1, p2) on the unit sphere
fn polar_triangle_area(tan1: f64, lng1: f64, tan2: f64, lng2: f64) -> f64 {
    let delta_lng = lng1 - lng2;
    let t = tan1 * tan2;
    2.0 * (t * delta_lng.sin()).atan2(1.0 + t * delta_lng.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimap_core::models::DemoFarm;
    use proptest::prelude::*;

    /// Exact area of a lat/lng rectangle on the sphere
    fn rectangle_area(lat1: f64, lat2: f64, lng_span: f64) -> f64 {
        EARTH_RADIUS_METERS
            * EARTH_RADIUS_METERS
            * lng_span.to_radians()
            * (lat2.to_radians().sin() - lat1.to_radians().sin())
    }

    fn relative_error(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn test_fewer_than_three_points_is_zero() {
        assert_eq!(compute_area(&[]), 0.0);
        assert_eq!(compute_area(&[Point::new(15.0, 75.0)]), 0.0);
        assert_eq!(compute_area(&[Point::new(15.0, 75.0), Point::new(15.1, 75.1)]), 0.0);
        assert_eq!(EarthModel::Wgs84.area(&[Point::new(15.0, 75.0)]), 0.0);
    }

    #[test]
    fn test_equator_square() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.01),
            Point::new(0.01, 0.01),
            Point::new(0.01, 0.0),
        ];

        let area = compute_area(&square);
        let expected = rectangle_area(0.0, 0.01, 0.01);
        assert!(relative_error(area, expected) < 1e-6, "area {} expected {}", area, expected);
    }

    #[test]
    fn test_mid_latitude_rectangle() {
        let rect = vec![
            Point::new(45.0, 10.0),
            Point::new(45.0, 10.01),
            Point::new(45.01, 10.01),
            Point::new(45.01, 10.0),
        ];

        let area = compute_area(&rect);
        let expected = rectangle_area(45.0, 45.01, 0.01);
        assert!(relative_error(area, expected) < 1e-6, "area {} expected {}", area, expected);
    }

    #[test]
    fn test_counter_clockwise_is_positive() {
        // lng increases then lat increases: counter-clockwise in x/y
        let ccw = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.01),
            Point::new(0.01, 0.01),
            Point::new(0.01, 0.0),
        ];
        assert!(compute_signed_area(&ccw) > 0.0);
    }

    #[test]
    fn test_demo_farm_area() {
        let farm = DemoFarm::shivapur();
        let hectares = compute_area_hectares(&farm.boundary);
        assert!((hectares - 18.3613).abs() < 0.001, "got {} ha", hectares);
    }

    #[test]
    fn test_agrees_with_chamberlain_duquette() {
        use geo::ChamberlainDuquetteArea;

        let farm = DemoFarm::shivapur();
        let ours = compute_area(&farm.boundary);
        let theirs = to_geo_polygon(&farm.boundary).chamberlain_duquette_unsigned_area();
        assert!(relative_error(ours, theirs) < 0.001, "ours {} theirs {}", ours, theirs);
    }

    #[test]
    fn test_wgs84_close_to_sphere() {
        let farm = DemoFarm::shivapur();
        let sphere = EarthModel::Sphere.area(&farm.boundary);
        let ellipsoid = EarthModel::Wgs84.area(&farm.boundary);

        // The sphere uses the equatorial radius, so it runs slightly large
        assert!(relative_error(ellipsoid, sphere) < 0.01, "{} vs {}", ellipsoid, sphere);
    }

    #[test]
    fn test_hectare_conversion() {
        assert_eq!(square_meters_to_hectares(25_000.0), 2.5);
    }

    fn parcel_strategy() -> impl Strategy<Value = Vec<Point>> {
        // Convex polygon around a random centre: vertices on a small circle
        (-60.0f64..60.0, -170.0f64..170.0, 3usize..12, 0.001f64..0.05).prop_map(
            |(lat, lng, n, radius)| {
                (0..n)
                    .map(|i| {
                        let theta = std::f64::consts::TAU * i as f64 / n as f64;
                        Point::new(lat + radius * theta.sin(), lng + radius * theta.cos())
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_rotation_invariant(points in parcel_strategy(), shift in 0usize..12) {
            let mut rotated = points.clone();
            let len = rotated.len();
            rotated.rotate_left(shift % len);

            let a = compute_signed_area(&points);
            let b = compute_signed_area(&rotated);
            prop_assert!((a - b).abs() <= a.abs() * 1e-9 + 1e-6);
        }

        #[test]
        fn prop_reversal_flips_sign(points in parcel_strategy()) {
            let mut reversed = points.clone();
            reversed.reverse();

            let a = compute_signed_area(&points);
            let b = compute_signed_area(&reversed);
            prop_assert!((a + b).abs() <= a.abs() * 1e-9 + 1e-6);
            let unsigned_gap = (compute_area(&points) - compute_area(&reversed)).abs();
            prop_assert!(unsigned_gap <= a.abs() * 1e-9 + 1e-6);
        }
    }
}
