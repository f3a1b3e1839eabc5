//! Boundary geometry types.
//!
//! Coordinates are WGS 84 degrees. The wire format is `{ "lat": .., "lng": .. }`,
//! which is what the backend stores for every boundary vertex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AgrimapError;

/// Minimum number of points that enclose an area
pub const MIN_POLYGON_POINTS: usize = 3;

/// A geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Parses `"LAT,LNG"`
impl FromStr for Point {
    type Err = AgrimapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| AgrimapError::Parse {
            reason: format!("expected LAT,LNG but got '{}'", s),
        })?;

        let parse = |value: &str, axis: &str| {
            value.trim().parse::<f64>().map_err(|e| AgrimapError::Parse {
                reason: format!("invalid {} '{}': {}", axis, value.trim(), e),
            })
        };

        Ok(Self::new(parse(lat, "latitude")?, parse(lng, "longitude")?))
    }
}

/// Ordered boundary vertices in click order. The ring is implicitly closed.
pub type Boundary = Vec<Point>;

/// Owned copy of a collector's state, handed to the submitter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundarySnapshot {
    pub points: Boundary,

    /// Enclosed area in hectares
    pub area_hectares: f64,
}

impl BoundarySnapshot {
    /// Whether the snapshot encloses an area
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }
}
