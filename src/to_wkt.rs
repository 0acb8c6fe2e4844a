//! WKT geometry text for ways, boundaries and location sequences

use colimit_core::{Boundary, Error, Location, Way};
use geo::{Geometry, LineString, Point, Rect};
use wkt::{ToWkt, TryFromWkt};

/// Way geometry as a `LINESTRING`
pub fn way_to_wkt(way: &Way) -> String {
    let line: LineString<f64> = way.geometry().iter().map(|l| Point::from(l).0).collect();
    line.to_wkt().to_string()
}

/// Boundary as a closed `POLYGON`
pub fn boundary_to_wkt(boundary: &Boundary) -> String {
    Rect::from(boundary).to_polygon().to_wkt().to_string()
}

/// Locations at the vertices of a `POINT`, `MULTIPOINT` or `LINESTRING`.
///
/// The locations are at rest and stamped with the current time.
///
/// # Errors
///
/// [`Error::Wkt`] if the text does not parse or holds another geometry type.
pub fn locations_from_wkt(text: &str) -> Result<Vec<Location>, Error> {
    let geometry = Geometry::<f64>::try_from_wkt_str(text)
        .map_err(|e| Error::Wkt(format!("Failed to parse WKT: {e}")))?;
    let points: Vec<Point<f64>> = match geometry {
        Geometry::Point(point) => vec![point],
        Geometry::MultiPoint(points) => points.0,
        Geometry::LineString(line) => line.points().collect(),
        other => {
            return Err(Error::Wkt(format!(
                "Expected a point or line string, got {other:?}"
            )));
        }
    };
    Ok(points.into_iter().map(Location::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_way_line_string() {
        let way = Way::builder()
            .geometry([Location::new(49.87, 8.65), Location::new(49.88, 8.66)])
            .build()
            .unwrap();
        assert_eq!(way_to_wkt(&way), "LINESTRING(8.65 49.87,8.66 49.88)");
    }

    #[test]
    fn test_boundary_polygon() {
        let locations = [Location::new(1.0, 2.0), Location::new(3.0, 5.0)];
        let boundary = Location::boundary(&locations, 0.0).unwrap();
        let text = boundary_to_wkt(&boundary);
        assert!(text.starts_with("POLYGON(("), "{text}");
        assert!(text.contains("2 1"), "{text}");
        assert!(text.contains("5 3"), "{text}");
    }

    #[test]
    fn test_locations_from_wkt() {
        let locations = locations_from_wkt("LINESTRING(8.65 49.87,8.66 49.88)").unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[1].coordinate(), (49.88, 8.66));

        let single = locations_from_wkt("POINT(8.65 49.87)").unwrap();
        assert_eq!(single[0].coordinate(), (49.87, 8.65));

        assert!(matches!(
            locations_from_wkt("POLYGON((0 0,1 0,1 1,0 0))"),
            Err(Error::Wkt(_))
        ));
        assert!(matches!(locations_from_wkt("LINESTRING(oops)"), Err(Error::Wkt(_))));
    }
}
