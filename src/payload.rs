//! Way payloads as exchanged with the limits service
//!
//! The service answers way queries either with a bare array of way records
//! or with an object holding them under `ways`. Cached payloads are written
//! as bare arrays.

use colimit_core::{Error, Way};
use serde::de::Error as _;
use serde_json::Value;

/// Parses ways from a JSON payload.
///
/// # Errors
///
/// [`Error::Json`] if the payload is malformed or a way fails validation.
pub fn ways_from_json(text: &str) -> Result<Vec<Way>, Error> {
    let records = match serde_json::from_str(text)? {
        Value::Object(mut response) => response.remove("ways").ok_or_else(|| {
            serde_json::Error::custom("expected an object with `ways` or an array of ways")
        })?,
        records => records,
    };
    let ways: Vec<Way> = serde_json::from_value(records)?;
    log::debug!("Parsed {} ways from payload", ways.len());
    Ok(ways)
}

/// Writes ways as a bare JSON array of way records.
pub fn ways_to_json(ways: &[Way]) -> Result<String, Error> {
    Ok(serde_json::to_string(ways)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use colimit_core::{Location, Speed};
    use serde_json::json;

    fn records() -> serde_json::Value {
        json!([
            {
                "id": 1,
                "oneway": true,
                "limit": 13.89,
                "geometry": [
                    {"latitude": 49.87, "longitude": 8.65},
                    {"latitude": 49.88, "longitude": 8.66},
                ],
            },
            {"id": 2, "limit": -1.0, "geometry": []},
        ])
    }

    #[test]
    fn test_bare_array() {
        let ways = ways_from_json(&records().to_string()).unwrap();
        assert_eq!(ways.len(), 2);
        assert_eq!(ways[0].limit(), Some(Speed::from_mps(13.89)));
        assert!(ways[0].oneway());
        assert_eq!(ways[1].limit(), None);
    }

    #[test]
    fn test_response_object() {
        let text = json!({"limit": 13.89, "ways": records()}).to_string();
        let ways = ways_from_json(&text).unwrap();
        assert_eq!(ways.len(), 2);
        assert_eq!(ways[1].id(), 2);
    }

    #[test]
    fn test_round_trip() {
        let ways = ways_from_json(&records().to_string()).unwrap();
        let text = ways_to_json(&ways).unwrap();
        assert_eq!(ways_from_json(&text).unwrap(), ways);
    }

    #[test]
    fn test_round_trip_of_extrapolated_ways() {
        let start = Location::builder()
            .coordinate(49.867219, 8.638495)
            .speed(Speed::from_mps(13.7))
            .direction(241.3)
            .build();
        let ways: Vec<Way> = (0..)
            .zip(start.extrapolate().take(600).collect::<Vec<_>>().chunks(3))
            .map(|(id, geometry)| Way::builder().id(id).geometry(geometry.to_vec()).build().unwrap())
            .collect();
        let text = ways_to_json(&ways).unwrap();
        assert_eq!(ways_from_json(&text).unwrap(), ways);
        let response = format!("{{\"ways\": {text}}}");
        assert_eq!(ways_from_json(&response).unwrap(), ways);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(ways_from_json("{\"roads\": []}"), Err(Error::Json(_))));
        assert!(matches!(ways_from_json("[{\"id\": \"one\"}]"), Err(Error::Json(_))));
        assert!(matches!(ways_from_json("42"), Err(Error::Json(_))));
    }

    #[test]
    fn test_invalid_way_keeps_its_message() {
        let way = json!({
            "id": 3,
            "nodes": [1, 2],
            "geometry": [{"id": 2, "latitude": 0.0, "longitude": 0.0}],
        });
        for payload in [json!([way]), json!({"ways": [way]})] {
            let message = ways_from_json(&payload.to_string()).unwrap_err().to_string();
            assert!(message.contains("order of nodes"), "{message}");
        }
    }
}
