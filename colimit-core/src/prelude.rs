pub use crate::Error;

// Motion and geometry
pub use crate::geometry::{FlatEarth, GeometryConfig, GeometryModel, ModelKind, Spherical};
pub use crate::location::{Boundary, Diameter, Location, LocationBuilder, Step};
pub use crate::speed::{Speed, SpeedUnit};

// Ways and tracks
pub use crate::model::{Containable, Way, WayBuilder};
pub use crate::track::Track;

// Serialized forms
pub use crate::location::LocationRecord;
pub use crate::model::WayRecord;

// Identifiers
pub use crate::NodeId;
pub use crate::WayId;
