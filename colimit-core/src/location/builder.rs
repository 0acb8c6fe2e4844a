use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use super::Location;
use crate::geometry::{GeometryModel, default_model, normalize_bearing};
use crate::{NodeId, Speed};

/// Optional location fields.
///
/// Used both to construct a new [`Location`] (unset fields take their
/// defaults) and to override fields of an existing one
/// ([`Location::clone_with`], [`Location::diff_with`], [`Location::step_with`]).
#[derive(Debug, Clone, Default)]
pub struct LocationBuilder {
    pub(crate) id: Option<NodeId>,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) speed: Option<Speed>,
    pub(crate) direction: Option<f64>,
    pub(crate) time: Option<DateTime<Utc>>,
    pub(crate) timedelta: Option<TimeDelta>,
    pub(crate) model: Option<Arc<dyn GeometryModel>>,
}

impl LocationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn coordinate(self, latitude: f64, longitude: f64) -> Self {
        self.latitude(latitude).longitude(longitude)
    }

    pub fn speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Heading in degrees, normalized into `[0, 360)` on build
    pub fn direction(mut self, direction: f64) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn timedelta(mut self, timedelta: TimeDelta) -> Self {
        self.timedelta = Some(timedelta);
        self
    }

    pub fn model(mut self, model: Arc<dyn GeometryModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Builds the location, unset fields default to zero, the current
    /// time and the flat earth model
    pub fn build(self) -> Location {
        Location {
            id: self.id.unwrap_or_default(),
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
            speed: self.speed.unwrap_or_default(),
            direction: normalize_bearing(self.direction.unwrap_or_default()),
            time: self.time.unwrap_or_else(Utc::now),
            timedelta: self.timedelta.unwrap_or_else(TimeDelta::zero),
            model: self.model.unwrap_or_else(default_model),
        }
    }

    /// Builds a location taking unset fields from `base`
    pub(crate) fn apply(self, base: &Location) -> Location {
        Location {
            id: self.id.unwrap_or(base.id),
            latitude: self.latitude.unwrap_or(base.latitude),
            longitude: self.longitude.unwrap_or(base.longitude),
            speed: self.speed.unwrap_or(base.speed),
            direction: self
                .direction
                .map_or(base.direction, normalize_bearing),
            time: self.time.unwrap_or(base.time),
            timedelta: self.timedelta.unwrap_or(base.timedelta),
            model: self.model.unwrap_or_else(|| Arc::clone(&base.model)),
        }
    }
}
