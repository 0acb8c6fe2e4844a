//! Serialized form of a way as exchanged with the limits service

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::Way;
use crate::location::{Location, LocationRecord};
use crate::{Error, NodeId, Speed, SpeedUnit, WayId};

/// Flat record of a [`Way`].
///
/// Only id, flags, limit and the geometry coordinates are written. On input
/// `nodes`, `tags` and full location records are accepted as well. A limit
/// of `-1.0` or `null` means there is no limit information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WayRecord {
    #[serde(default)]
    pub id: WayId,
    #[serde(default, skip_serializing)]
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub oneway: bool,
    #[serde(default)]
    pub variable: bool,
    #[serde(default)]
    pub conditional: bool,
    /// Limit in m/s
    #[serde(default = "no_limit", deserialize_with = "deserialize_limit")]
    pub limit: f64,
    #[serde(default)]
    pub geometry: Vec<LocationRecord>,
    #[serde(default, skip_serializing)]
    pub tags: HashMap<String, String>,
}

impl WayRecord {
    pub const NO_LIMIT: f64 = -1.0;
}

impl Default for WayRecord {
    fn default() -> Self {
        Self {
            id: 0,
            nodes: Vec::new(),
            oneway: false,
            variable: false,
            conditional: false,
            limit: Self::NO_LIMIT,
            geometry: Vec::new(),
            tags: HashMap::new(),
        }
    }
}

fn no_limit() -> f64 {
    WayRecord::NO_LIMIT
}

fn deserialize_limit<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(WayRecord::NO_LIMIT))
}

impl From<&Way> for WayRecord {
    fn from(way: &Way) -> Self {
        Self {
            id: way.id(),
            nodes: way.nodes().to_vec(),
            oneway: way.oneway(),
            variable: way.variable(),
            conditional: way.conditional(),
            limit: way.limit_value(),
            geometry: way.geometry().iter().map(LocationRecord::coordinate).collect(),
            tags: way.tags().clone(),
        }
    }
}

impl From<Way> for WayRecord {
    fn from(way: Way) -> Self {
        Self::from(&way)
    }
}

impl TryFrom<WayRecord> for Way {
    type Error = Error;

    fn try_from(record: WayRecord) -> Result<Self, Self::Error> {
        let limit = (record.limit != WayRecord::NO_LIMIT)
            .then(|| Speed::new(record.limit, SpeedUnit::Mps))
            .transpose()?;
        Way::builder()
            .id(record.id)
            .nodes(record.nodes)
            .geometry(record.geometry.into_iter().map(Location::from))
            .oneway(record.oneway)
            .variable(record.variable)
            .conditional(record.conditional)
            .limit(limit)
            .tags(record.tags)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "id": 4711,
            "nodes": [1, 2, 3],
            "oneway": true,
            "variable": false,
            "conditional": true,
            "limit": 13.89,
            "tags": {"highway": "primary", "maxspeed": "50"},
            "geometry": [
                {"id": 1, "latitude": 49.87, "longitude": 8.65},
                {"lat": 49.88, "lon": 8.66},
                {"latitude": 49.89, "longitude": 8.67},
            ],
        })
    }

    #[test]
    fn test_from_payload() {
        let way: Way = serde_json::from_value(payload()).unwrap();
        assert_eq!(way.id(), 4711);
        assert_eq!(way.nodes(), &[1, 2, 3]);
        assert!(way.oneway() && way.conditional() && !way.variable());
        assert_eq!(way.limit(), Some(Speed::from_mps(13.89)));
        assert_eq!(way.tags().len(), 2);
        assert_eq!(way.geometry()[1].coordinate(), (49.88, 8.66));
    }

    #[test]
    fn test_written_fields() {
        let way: Way = serde_json::from_value(payload()).unwrap();
        assert_eq!(
            serde_json::to_value(&way).unwrap(),
            json!({
                "id": 4711,
                "oneway": true,
                "variable": false,
                "conditional": true,
                "limit": 13.89,
                "geometry": [
                    {"latitude": 49.87, "longitude": 8.65},
                    {"latitude": 49.88, "longitude": 8.66},
                    {"latitude": 49.89, "longitude": 8.67},
                ],
            })
        );
    }

    #[test]
    fn test_no_limit_sentinel() {
        for limit in [json!(-1.0), json!(null)] {
            let way: Way = serde_json::from_value(json!({"id": 1, "limit": limit})).unwrap();
            assert_eq!(way.limit(), None);
        }
        let way: Way = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(way.limit(), None);
        assert_eq!(WayRecord::from(&way).limit, -1.0);
        assert_eq!(serde_json::to_value(&way).unwrap()["limit"], json!(-1.0));
    }

    #[test]
    fn test_record_round_trip() {
        let way: Way = serde_json::from_value(payload()).unwrap();
        let back = Way::try_from(WayRecord::from(&way)).unwrap();
        assert_eq!(back, way);

        let json = serde_json::to_string(&way).unwrap();
        let again: Way = serde_json::from_str(&json).unwrap();
        assert_eq!(again, way);
        // nodes and tags are not written
        assert!(again.nodes().is_empty());
        assert!(again.tags().is_empty());
    }

    #[test]
    fn test_round_trip_of_computed_coordinates() {
        let start = Location::builder()
            .coordinate(49.867219, 8.638495)
            .speed(Speed::from_mps(23.23))
            .direction(69.1)
            .timedelta(chrono::TimeDelta::milliseconds(1234))
            .build();
        let locations: Vec<Location> = start.extrapolate().take(2000).collect();
        for (id, pair) in (0..).zip(locations.chunks(2)) {
            let way = Way::builder()
                .id(id)
                .geometry(pair.to_vec())
                .limit(pair[0].speed())
                .build()
                .unwrap();
            let json = serde_json::to_string(&way).unwrap();
            let back: Way = serde_json::from_str(&json).unwrap();
            assert_eq!(back, way, "{json}");
        }
    }

    #[test]
    fn test_order_mismatch_in_payload() {
        let result: Result<Way, _> = serde_json::from_value(json!({
            "id": 1,
            "nodes": [1, 2],
            "geometry": [{"id": 2, "latitude": 0.0, "longitude": 0.0}],
        }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("order of nodes"), "{message}");
    }
}
