//! Know your limits: positional geometry for speed limit lookups.
//!
//! Re-exports the engine from `colimit_core` and adds the interchange
//! formats used around it: way payloads as served by the limits service,
//! `GeoJSON` export and WKT geometry text.

pub mod payload;
pub mod to_geojson;
pub mod to_wkt;

pub use colimit_core::*;

pub use payload::{ways_from_json, ways_to_json};
pub use to_geojson::ToGeoJson;
pub use to_wkt::{boundary_to_wkt, locations_from_wkt, way_to_wkt};
