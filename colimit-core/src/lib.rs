//! Positional geometry engine for speed limit lookups.
//!
//! Locations carry a coordinate together with an instantaneous motion state
//! (speed, heading, time window). They are evaluated under a pluggable
//! [`GeometryModel`], grouped into [`Way`]s and queried for spatial and
//! temporal aggregates.

pub mod error;
pub mod geometry;
pub mod location;
pub mod model;
pub mod prelude;
pub mod speed;
pub mod track;

pub use error::Error;
pub use geometry::{EARTH_RADIUS, FlatEarth, GeometryConfig, GeometryModel, ModelKind, Spherical};
pub use location::{Boundary, Diameter, Location, LocationBuilder, LocationRecord, Step};
pub use model::{Containable, Way, WayBuilder, WayRecord};
pub use speed::{Speed, SpeedUnit};
pub use track::Track;

/// Identifier of a graph node, `0` means "unknown"
pub type NodeId = i64;
/// Identifier of a way
pub type WayId = i64;
