use colimit_core::location::seconds;
use colimit_core::{Error, Location, Track, Way};
use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value as GeoJsonValue};
use serde_json::json;

/// Conversion into `GeoJSON` for inspection in map viewers
pub trait ToGeoJson {
    fn to_geojson(&self) -> Result<GeoJson, Error>;

    fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJson(e.to_string()))
    }
}

fn location_feature(location: &Location, index: Option<usize>) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&Point::from(location)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "kind": "location",
            "index": index,
            "id": location.id(),
            "speed": location.speed().mps(),
            "speed_kmh": location.speed().kmh(),
            "direction": location.direction(),
            "time": location.time(),
            "timedelta": seconds(location.timedelta()),
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJson(e.to_string()))
}

fn line_geometry<'a>(locations: impl IntoIterator<Item = &'a Location>) -> Geometry {
    let line: LineString<f64> = locations.into_iter().map(|l| Point::from(l).0).collect();
    Geometry::new(GeoJsonValue::from(&line))
}

fn way_feature(way: &Way) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "id": way.id(),
        "geometry": line_geometry(way.geometry()),
        "properties": {
            "kind": "way",
            "oneway": way.oneway(),
            "variable": way.variable(),
            "conditional": way.conditional(),
            "limit": way.limit().map(|limit| limit.mps()),
            "limit_kmh": way.limit().map(|limit| limit.kmh()),
            "length": way.length(),
            "tags": way.tags(),
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJson(e.to_string()))
}

impl ToGeoJson for Location {
    /// Point feature carrying the motion state as properties
    fn to_geojson(&self) -> Result<GeoJson, Error> {
        Ok(GeoJson::Feature(location_feature(self, None)?))
    }
}

impl ToGeoJson for Way {
    /// Line string feature carrying flags and limit as properties
    fn to_geojson(&self) -> Result<GeoJson, Error> {
        Ok(GeoJson::Feature(way_feature(self)?))
    }
}

impl ToGeoJson for [Way] {
    fn to_geojson(&self) -> Result<GeoJson, Error> {
        let features = self.iter().map(way_feature).collect::<Result<Vec<_>, _>>()?;
        Ok(GeoJson::FeatureCollection(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        }))
    }
}

impl ToGeoJson for Track {
    /// The whole track as a line string followed by one point per location
    fn to_geojson(&self) -> Result<GeoJson, Error> {
        let mut features = Vec::with_capacity(self.len() + 1);

        let summary = json!({
            "type": "Feature",
            "geometry": line_geometry(self.locations().iter().chain(self.end())),
            "properties": {
                "kind": "track",
                "points": self.len(),
                "distance": self.distance(),
                "duration": seconds(self.duration()),
                "average_speed": self.average_speed().mps(),
            }
        });
        features.push(Feature::from_json_value(summary).map_err(|e| Error::GeoJson(e.to_string()))?);

        for (index, location) in self.locations().iter().enumerate() {
            features.push(location_feature(location, Some(index))?);
        }

        Ok(GeoJson::FeatureCollection(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use colimit_core::Speed;
    use serde_json::Value;

    fn way() -> Way {
        Way::builder()
            .id(12)
            .geometry([Location::new(49.87, 8.65), Location::new(49.88, 8.66)])
            .limit(Speed::from_mps(13.89))
            .tag("highway", "secondary")
            .build()
            .unwrap()
    }

    fn as_value(geojson: &impl ToGeoJson) -> Value {
        serde_json::from_str(&geojson.to_geojson_string().unwrap()).unwrap()
    }

    #[test]
    fn test_location_feature() {
        let location = Location::builder()
            .coordinate(49.87, 8.65)
            .speed(Speed::from_mps(10.0))
            .direction(90.0)
            .build();
        let value = as_value(&location);
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"], json!([8.65, 49.87]));
        assert_eq!(value["properties"]["speed"], json!(10.0));
        assert_eq!(value["properties"]["direction"], json!(90.0));
    }

    #[test]
    fn test_way_feature() {
        let value = as_value(&way());
        assert_eq!(value["id"], json!(12));
        assert_eq!(value["geometry"]["type"], "LineString");
        assert_eq!(
            value["geometry"]["coordinates"],
            json!([[8.65, 49.87], [8.66, 49.88]])
        );
        assert_eq!(value["properties"]["limit"], json!(13.89));
        assert_eq!(value["properties"]["tags"]["highway"], "secondary");

        let unlimited = Way::builder().id(1).build().unwrap();
        assert_eq!(as_value(&unlimited)["properties"]["limit"], Value::Null);
    }

    #[test]
    fn test_way_collection() {
        let ways = vec![way(), way()];
        let GeoJson::FeatureCollection(collection) = ways.as_slice().to_geojson().unwrap() else {
            panic!("expected a feature collection");
        };
        assert_eq!(collection.features.len(), 2);
    }

    #[test]
    fn test_track_collection() {
        let start = Utc.with_ymd_and_hms(2021, 8, 31, 7, 30, 0).unwrap();
        let fixes = (0..4_i32).map(|i| {
            Location::builder()
                .coordinate(49.87 + 0.001 * f64::from(i), 8.65)
                .time(start + TimeDelta::seconds(i64::from(i) * 10))
                .build()
        });
        let track = Track::from_fixes(fixes);
        let value = as_value(&track);
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 4);
        assert_eq!(features[0]["properties"]["kind"], "track");
        assert_eq!(features[0]["properties"]["points"], json!(3));
        assert_eq!(features[0]["properties"]["duration"], json!(30.0));
        assert_eq!(features[3]["properties"]["index"], json!(2));
    }
}
