//! Derived locations: differences, motion steps and line projections

use chrono::TimeDelta;

use super::{Location, LocationBuilder};
use crate::Speed;

/// Motion applied by [`Location::step`]. Unset fields fall back to the
/// location's own motion state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step {
    /// Distance in meters, defaults to `speed × timedelta`
    pub radius: Option<f64>,
    /// Heading in degrees, defaults to the location's direction
    pub direction: Option<f64>,
    /// Duration of the motion, defaults to the location's timedelta
    pub timedelta: Option<TimeDelta>,
}

impl Step {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn direction(mut self, direction: f64) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn timedelta(mut self, timedelta: TimeDelta) -> Self {
        self.timedelta = Some(timedelta);
        self
    }
}

/// Fractional seconds of a duration
#[allow(clippy::cast_precision_loss)]
pub fn seconds(timedelta: TimeDelta) -> f64 {
    match timedelta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => timedelta.num_seconds() as f64 + f64::from(timedelta.subsec_nanos()) * 1e-9,
    }
}

/// Duration from fractional seconds, rounded to nanoseconds.
///
/// Beyond the nanosecond range (about 292 years) the value is rounded to
/// microseconds and saturates at the microsecond range.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seconds_to_timedelta(seconds: f64) -> TimeDelta {
    let nanos = (seconds * 1e9).round();
    if nanos.abs() < 9.2e18 {
        TimeDelta::nanoseconds(nanos as i64)
    } else {
        TimeDelta::microseconds((seconds * 1e6).round() as i64)
    }
}

impl Location {
    fn polar(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        self.model
            .to_polar(self.latitude, self.longitude, latitude, longitude)
    }

    /// Distance in meters to `other`
    pub fn distance_to(&self, other: &Location) -> f64 {
        self.polar(other.latitude, other.longitude).0
    }

    /// Bearing in degrees towards `other`
    pub fn bearing_to(&self, other: &Location) -> f64 {
        self.polar(other.latitude, other.longitude).1
    }

    /// Distance in meters to the coordinate origin (0, 0)
    pub fn distance_to_origin(&self) -> f64 {
        self.polar(0.0, 0.0).0
    }

    /// Bearing in degrees towards the coordinate origin (0, 0)
    pub fn bearing_to_origin(&self) -> f64 {
        self.polar(0.0, 0.0).1
    }

    /// Motion from this location to `other`.
    ///
    /// The result keeps this coordinate and time; its speed, direction and
    /// timedelta describe the move reaching `other`, so that
    /// `a.diff(b).next()` lands on `b`. If no time elapses between the two,
    /// the speed is zero.
    pub fn diff(&self, other: &Location) -> Location {
        self.diff_with(other, LocationBuilder::new())
    }

    /// Like [`Location::diff`], additionally overriding fields of the result.
    ///
    /// An overridden `timedelta` replaces the elapsed time between the two
    /// locations; overridden speed and direction are ignored.
    pub fn diff_with(&self, other: &Location, overrides: LocationBuilder) -> Location {
        let (distance, bearing) = self.polar(other.latitude, other.longitude);
        let elapsed = overrides
            .timedelta
            .unwrap_or_else(|| other.time - self.time);
        let secs = seconds(elapsed);
        let speed = if secs == 0.0 {
            Speed::ZERO
        } else {
            Speed::from_mps(distance / secs)
        };
        overrides
            .speed(speed)
            .direction(bearing)
            .timedelta(elapsed)
            .apply(self)
    }

    /// Location reached by following this location's own motion
    pub fn next(&self) -> Location {
        self.step(Step::default())
    }

    /// Location reached after `step`, time advances by the step's timedelta
    pub fn step(&self, step: Step) -> Location {
        self.step_with(step, LocationBuilder::new())
    }

    /// Like [`Location::step`], additionally overriding fields of the result.
    /// Overridden coordinates and time are ignored.
    pub fn step_with(&self, step: Step, overrides: LocationBuilder) -> Location {
        let timedelta = step.timedelta.unwrap_or(self.timedelta);
        let radius = step
            .radius
            .unwrap_or_else(|| self.speed.mps() * seconds(timedelta));
        let direction = step.direction.unwrap_or(self.direction);
        let (latitude, longitude) =
            self.model
                .to_offset(self.latitude, self.longitude, radius, direction);
        overrides
            .coordinate(latitude, longitude)
            .time(self.time.checked_add_signed(timedelta).unwrap_or(self.time))
            .apply(self)
    }

    /// Endless sequence of locations, each one step ahead of the previous
    pub fn extrapolate(&self) -> impl Iterator<Item = Location> {
        std::iter::successors(Some(self.next()), |location| Some(location.next()))
    }

    /// Orthogonal projection onto the line through `a` and `b`.
    ///
    /// `b` defaults to `a.next()`. The projected location points from `a` to
    /// `b` and carries the component of this location's velocity along that
    /// direction. With `segment` set, points falling outside the segment
    /// snap onto whichever end is nearer. If `a` and `b` share the same
    /// coordinate there is no line and a copy of `a` is returned.
    ///
    /// The projection is computed in the degree frame centered at `a`.
    pub fn project(&self, a: &Location, b: Option<&Location>, segment: bool) -> Location {
        let a_next;
        let b = match b {
            Some(b) => b,
            None => {
                a_next = a.next();
                &a_next
            }
        };

        let (ay, ax) = a.coordinate();
        let (by, bx) = (b.latitude - ay, b.longitude - ax);
        let (ly, lx) = (self.latitude - ay, self.longitude - ax);

        let dot_bb = bx * bx + by * by;
        if dot_bb == 0.0 {
            return a.clone();
        }
        let t = (lx * bx + ly * by) / dot_bb;

        let (_, bearing) = self
            .model
            .to_polar(a.latitude, a.longitude, b.latitude, b.longitude);
        let speed = self.speed * (self.direction - bearing).to_radians().cos();

        let (latitude, longitude) = if segment && !(0.0..1.0).contains(&t) {
            let nearest = if self.distance_to(a) <= self.distance_to(b) {
                a
            } else {
                b
            };
            nearest.coordinate()
        } else {
            (t * by + ay, t * bx + ax)
        };

        LocationBuilder::new()
            .coordinate(latitude, longitude)
            .direction(bearing)
            .speed(speed)
            .apply(self)
    }
}
