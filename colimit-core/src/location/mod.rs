//! Point in space and time with an instantaneous motion state

mod aggregate;
mod builder;
mod motion;
mod record;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::GeometryModel;
use crate::{NodeId, Speed};

pub use aggregate::{Boundary, Diameter};
pub use builder::LocationBuilder;
pub use motion::Step;
pub use record::LocationRecord;

pub use motion::seconds;
pub(crate) use motion::seconds_to_timedelta;

/// Point on earth with time, speed and direction.
///
/// `speed`, `direction` and `timedelta` describe a tangent vector at the
/// coordinate: moving for `timedelta` at `speed` along `direction` reaches
/// [`Location::next`]. How tangent vectors map onto the earth is decided by the
/// location's [`GeometryModel`].
///
/// Two locations are equal if latitude, longitude, speed, direction and
/// timedelta match. Time, node id and geometry model are bookkeeping and do
/// not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "LocationRecord", from = "LocationRecord")]
pub struct Location {
    id: NodeId,
    latitude: f64,
    longitude: f64,
    speed: Speed,
    direction: f64,
    time: DateTime<Utc>,
    timedelta: TimeDelta,
    model: Arc<dyn GeometryModel>,
}

impl Location {
    /// Location at the given coordinate, at rest, stamped with the current time
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LocationBuilder::new()
            .latitude(latitude)
            .longitude(longitude)
            .build()
    }

    pub fn builder() -> LocationBuilder {
        LocationBuilder::new()
    }

    /// Copy of this location with the given fields replaced
    pub fn clone_with(&self, overrides: LocationBuilder) -> Self {
        overrides.apply(self)
    }

    /// Node identifier, `0` if the location is not bound to a graph node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Pair of latitude and longitude
    pub fn coordinate(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Heading in degrees clockwise from north, in `[0, 360)`
    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Time window of the motion described by speed and direction
    pub fn timedelta(&self) -> TimeDelta {
        self.timedelta
    }

    pub fn model(&self) -> &Arc<dyn GeometryModel> {
        &self.model
    }

    /// True if coordinate and motion state are all zero
    pub fn is_zero(&self) -> bool {
        self.latitude == 0.0
            && self.longitude == 0.0
            && self.speed.is_zero()
            && self.direction == 0.0
            && self.timedelta.is_zero()
    }
}

impl Default for Location {
    fn default() -> Self {
        LocationBuilder::new().build()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude == other.latitude
            && self.longitude == other.longitude
            && self.speed == other.speed
            && self.direction == other.direction
            && self.timedelta == other.timedelta
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({:08.6},{:09.6})", self.latitude, self.longitude)?;
        if !self.speed.is_zero() || self.direction != 0.0 {
            write!(
                f,
                " with speed {:.1} km/h in direction {:.2}°",
                self.speed.kmh(),
                self.direction
            )?;
        }
        write!(f, " at {}", self.time.format("%y-%m-%d:%H-%M-%S"))?;
        if !self.timedelta.is_zero() {
            write!(f, " plus {:.3}s", seconds(self.timedelta))?;
        }
        Ok(())
    }
}

impl From<&Location> for Point<f64> {
    fn from(location: &Location) -> Self {
        Point::new(location.longitude, location.latitude)
    }
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        Location::new(point.y(), point.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spherical;
    use chrono::TimeZone;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 12, 6, 14, 20, 0).unwrap()
    }

    #[test]
    fn test_accessors() {
        let location = Location::builder()
            .id(42)
            .latitude(49.867219)
            .longitude(8.638495)
            .speed(Speed::from_mps(23.23))
            .direction(69.1)
            .time(stamp())
            .timedelta(TimeDelta::milliseconds(1234))
            .build();

        assert_eq!(location.id(), 42);
        assert_eq!(location.coordinate(), (49.867219, 8.638495));
        assert_eq!(location.speed(), Speed::from_mps(23.23));
        assert_eq!(location.direction(), 69.1);
        assert_eq!(location.time(), stamp());
        assert_eq!(location.timedelta(), TimeDelta::milliseconds(1234));
    }

    #[test]
    fn test_direction_is_normalized() {
        let location = Location::builder().direction(-90.0).build();
        assert_eq!(location.direction(), 270.0);
        let location = Location::builder().direction(450.0).build();
        assert_eq!(location.direction(), 90.0);
    }

    #[test]
    fn test_equality_ignores_time_id_and_model() {
        let a = Location::builder()
            .latitude(1.0)
            .longitude(2.0)
            .id(1)
            .time(stamp())
            .build();
        let b = a.clone_with(
            LocationBuilder::new()
                .id(2)
                .time(stamp() + TimeDelta::hours(1))
                .model(Arc::new(Spherical::default())),
        );
        assert_eq!(a, b);

        let c = a.clone_with(LocationBuilder::new().speed(Speed::from_mps(1.0)));
        assert_ne!(a, c);
        let d = a.clone_with(LocationBuilder::new().timedelta(TimeDelta::seconds(1)));
        assert_ne!(a, d);
    }

    #[test]
    fn test_is_zero() {
        assert!(Location::default().is_zero());
        assert!(!Location::new(0.0, 0.1).is_zero());
        assert!(
            !Location::builder()
                .timedelta(TimeDelta::seconds(1))
                .build()
                .is_zero()
        );
    }

    #[test]
    fn test_display() {
        let location = Location::builder()
            .latitude(49.867219)
            .longitude(8.638495)
            .speed(Speed::from_mps(10.0))
            .direction(68.0)
            .time(stamp())
            .timedelta(TimeDelta::milliseconds(1500))
            .build();
        assert_eq!(
            location.to_string(),
            "Location(49.867219,08.638495) with speed 36.0 km/h in direction 68.00° \
             at 19-12-06:14-20-00 plus 1.500s"
        );
    }

    #[test]
    fn test_geo_point_conversion() {
        let location = Location::new(49.0, 8.0);
        let point = Point::from(&location);
        assert_eq!(point.x(), 8.0);
        assert_eq!(point.y(), 49.0);
        assert_eq!(Location::from(point), location);
    }
}
