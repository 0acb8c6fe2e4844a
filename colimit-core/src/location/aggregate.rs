//! Bounding boxes, centers and extents of location sets

use geo::{Coord, Rect};

use super::{Location, LocationBuilder, Step};

/// Axis aligned bounding box in latitude and longitude
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub south_west: Location,
    pub north_east: Location,
}

/// Extent of a boundary in meters along each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diameter {
    /// South west to north west corner
    pub south_north: f64,
    /// South west to south east corner
    pub west_east: f64,
}

impl Boundary {
    pub fn south(&self) -> f64 {
        self.south_west.latitude
    }

    pub fn west(&self) -> f64 {
        self.south_west.longitude
    }

    pub fn north(&self) -> f64 {
        self.north_east.latitude
    }

    pub fn east(&self) -> f64 {
        self.north_east.longitude
    }

    /// Inclusive containment test.
    ///
    /// Boxes crossing the date line are not handled.
    pub fn contains(&self, location: &Location) -> bool {
        (self.south()..=self.north()).contains(&location.latitude)
            && (self.west()..=self.east()).contains(&location.longitude)
    }

    /// Arithmetic midpoint of the two corners
    pub fn center(&self) -> Location {
        let latitude = self.south() + (self.north() - self.south()) / 2.0;
        let longitude = self.west() + (self.east() - self.west()) / 2.0;
        self.south_west
            .clone_with(LocationBuilder::new().coordinate(latitude, longitude))
    }

    pub fn diameter(&self) -> Diameter {
        let model = self.south_west.model();
        let (west_east, _) = model.to_polar(self.south(), self.west(), self.south(), self.east());
        let (south_north, _) = model.to_polar(self.south(), self.west(), self.north(), self.west());
        Diameter {
            south_north,
            west_east,
        }
    }
}

impl From<&Boundary> for Rect<f64> {
    fn from(boundary: &Boundary) -> Self {
        Rect::new(
            Coord {
                x: boundary.west(),
                y: boundary.south(),
            },
            Coord {
                x: boundary.east(),
                y: boundary.north(),
            },
        )
    }
}

impl Location {
    /// Bounding box of `locations`, widened by `radius` meters at both corners.
    ///
    /// The south west corner moves `radius` towards 225°, the north east corner
    /// towards 45°. The corners use the geometry model and time of the first
    /// location. Returns `None` if there are no locations.
    pub fn boundary<'a, I>(locations: I, radius: f64) -> Option<Boundary>
    where
        I: IntoIterator<Item = &'a Location>,
    {
        let mut locations = locations.into_iter();
        let first = locations.next()?;
        let (mut south, mut west) = first.coordinate();
        let (mut north, mut east) = (south, west);
        for location in locations {
            south = south.min(location.latitude);
            west = west.min(location.longitude);
            north = north.max(location.latitude);
            east = east.max(location.longitude);
        }

        let corner = |latitude: f64, longitude: f64, direction: f64| {
            LocationBuilder::new()
                .coordinate(latitude, longitude)
                .time(first.time)
                .model(first.model.clone())
                .build()
                .step(Step::new().radius(radius).direction(direction))
        };

        Some(Boundary {
            south_west: corner(south, west, 225.0),
            north_east: corner(north, east, 45.0),
        })
    }

    /// Center of the boundary of `locations`
    pub fn center<'a, I>(locations: I, radius: f64) -> Option<Location>
    where
        I: IntoIterator<Item = &'a Location>,
    {
        Self::boundary(locations, radius).map(|boundary| boundary.center())
    }

    /// Extent of the boundary of `locations`
    pub fn diameter<'a, I>(locations: I, radius: f64) -> Option<Diameter>
    where
        I: IntoIterator<Item = &'a Location>,
    {
        Self::boundary(locations, radius).map(|boundary| boundary.diameter())
    }
}
