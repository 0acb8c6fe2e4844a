use serde::{Deserialize, Serialize};

use super::{EARTH_RADIUS, GeometryModel, normalize_bearing};

/// Local tangent plane approximation with a fixed earth radius.
///
/// Longitude degrees are *not* scaled by `cos(latitude)`, which keeps the pair
/// of transforms symmetric and exactly invertible at the cost of accuracy
/// away from the equator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatEarth {
    /// Earth radius in meters
    pub radius: f64,
}

impl FlatEarth {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Default for FlatEarth {
    fn default() -> Self {
        Self::new(EARTH_RADIUS)
    }
}

impl GeometryModel for FlatEarth {
    fn to_offset(&self, latitude: f64, longitude: f64, distance: f64, bearing: f64) -> (f64, f64) {
        let phi = bearing.to_radians();
        let lat = latitude + (distance * phi.cos() / self.radius).to_degrees();
        let lon = longitude + (distance * phi.sin() / self.radius).to_degrees();
        (lat, lon)
    }

    fn to_polar(&self, latitude: f64, longitude: f64, lat: f64, lon: f64) -> (f64, f64) {
        let dx = (lat - latitude).to_radians() * self.radius;
        let dy = (lon - longitude).to_radians() * self.radius;
        let distance = dx.hypot(dy);
        if distance == 0.0 {
            return (0.0, 0.0);
        }
        let angle = (dx / distance).clamp(-1.0, 1.0).acos().to_degrees();
        // acos only covers [0, 180], mirror westward offsets
        let bearing = if dy < 0.0 { 360.0 - angle } else { angle };
        (distance, normalize_bearing(bearing))
    }
}
