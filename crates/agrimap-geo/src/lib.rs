//! AgriMap Geo - Geodesic area and boundary validation
//!
//! This crate handles the geospatial side of parcel capture: computing the
//! enclosed surface area of a boundary and checking its coordinates.

pub mod area;
pub mod models;
pub mod validation;

pub use area::{
    compute_area, compute_area_hectares, compute_signed_area, square_meters_to_hectares,
    EarthModel, EARTH_RADIUS_METERS,
};
