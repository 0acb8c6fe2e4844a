//! Maps between the tangent space at a location (distance and bearing) and
//! coordinates on the earth.
//!
//! Bearings are measured in degrees clockwise from north and reported in
//! `[0, 360)`. Every model must satisfy the round trip
//! `to_polar(p, to_offset(p, d, b)) == (d, b)` up to floating point precision,
//! which all derived location operations rely on.

mod config;
mod flat;
mod spherical;

use std::fmt::Debug;
use std::sync::{Arc, LazyLock};

pub use config::{GeometryConfig, ModelKind};
pub use flat::FlatEarth;
pub use spherical::Spherical;

/// Earth radius in meters
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Pair of transforms between polar offsets and coordinates
pub trait GeometryModel: Debug + Send + Sync {
    /// Coordinate reached from (`latitude`, `longitude`) after `distance` meters
    /// along `bearing` degrees.
    fn to_offset(&self, latitude: f64, longitude: f64, distance: f64, bearing: f64) -> (f64, f64);

    /// Distance in meters and bearing in degrees from the first to the second coordinate.
    fn to_polar(&self, latitude: f64, longitude: f64, lat: f64, lon: f64) -> (f64, f64);
}

static DEFAULT_MODEL: LazyLock<Arc<dyn GeometryModel>> =
    LazyLock::new(|| Arc::new(FlatEarth::default()));

/// Shared handle to the flat earth model used when nothing else is configured
pub fn default_model() -> Arc<dyn GeometryModel> {
    Arc::clone(&DEFAULT_MODEL)
}

/// Wraps any angle in degrees into `[0, 360)`
pub fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
