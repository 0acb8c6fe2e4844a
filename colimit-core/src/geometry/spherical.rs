use serde::{Deserialize, Serialize};

use super::{EARTH_RADIUS, GeometryModel, normalize_bearing};

/// Great circle geometry on a sphere.
///
/// Offsets follow the destination point formula, polar coordinates the
/// haversine distance and the initial bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    /// Earth radius in meters
    pub radius: f64,
}

impl Spherical {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Default for Spherical {
    fn default() -> Self {
        Self::new(EARTH_RADIUS)
    }
}

impl GeometryModel for Spherical {
    fn to_offset(&self, latitude: f64, longitude: f64, distance: f64, bearing: f64) -> (f64, f64) {
        let delta = distance / self.radius;
        let theta = bearing.to_radians();
        let phi1 = latitude.to_radians();
        let lambda1 = longitude.to_radians();

        let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
        let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
        let lambda2 = lambda1
            + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

        (phi2.to_degrees(), lambda2.to_degrees())
    }

    fn to_polar(&self, latitude: f64, longitude: f64, lat: f64, lon: f64) -> (f64, f64) {
        let phi1 = latitude.to_radians();
        let phi2 = lat.to_radians();
        let d_phi = phi2 - phi1;
        let d_lambda = (lon - longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let distance = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt()) * self.radius;
        if distance == 0.0 {
            return (0.0, 0.0);
        }

        let y = d_lambda.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
        (distance, normalize_bearing(y.atan2(x).to_degrees()))
    }
}
