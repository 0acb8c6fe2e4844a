use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use chrono::TimeDelta;
use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Containable, WayRecord};
use crate::location::{Boundary, Diameter, Location, seconds};
use crate::{Error, NodeId, Speed, WayId};

/// Road or path segment with speed limit metadata.
///
/// `geometry` is index aligned with `nodes`: a location bound to a node
/// (non-zero id) must sit at the same position as that node. Equality and
/// hashing follow the serialized record, so nodes and tags are ignored and
/// geometry is compared by coordinate only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "WayRecord", try_from = "WayRecord")]
pub struct Way {
    id: WayId,
    nodes: Vec<NodeId>,
    geometry: Vec<Location>,
    oneway: bool,
    variable: bool,
    conditional: bool,
    limit: Option<Speed>,
    tags: HashMap<String, String>,
    boundary: OnceLock<Option<Boundary>>,
}

#[derive(Debug, Clone, Default)]
pub struct WayBuilder {
    id: WayId,
    nodes: Vec<NodeId>,
    geometry: Vec<Location>,
    oneway: bool,
    variable: bool,
    conditional: bool,
    limit: Option<Speed>,
    tags: HashMap<String, String>,
}

impl WayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: WayId) -> Self {
        self.id = id;
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.nodes = nodes.into_iter().collect();
        self
    }

    pub fn geometry(mut self, geometry: impl IntoIterator<Item = Location>) -> Self {
        self.geometry = geometry.into_iter().collect();
        self
    }

    pub fn oneway(mut self, oneway: bool) -> Self {
        self.oneway = oneway;
        self
    }

    /// Limit changes over time, e.g. by traffic control signs
    pub fn variable(mut self, variable: bool) -> Self {
        self.variable = variable;
        self
    }

    /// Limit applies only under conditions such as weather or vehicle class
    pub fn conditional(mut self, conditional: bool) -> Self {
        self.conditional = conditional;
        self
    }

    pub fn limit(mut self, limit: impl Into<Option<Speed>>) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn build(self) -> Result<Way, Error> {
        validate_order(&self.nodes, &self.geometry)?;
        Ok(Way {
            id: self.id,
            nodes: self.nodes,
            geometry: self.geometry,
            oneway: self.oneway,
            variable: self.variable,
            conditional: self.conditional,
            limit: self.limit,
            tags: self.tags,
            boundary: OnceLock::new(),
        })
    }
}

/// Every location bound to a node has to match the node at its index
fn validate_order(nodes: &[NodeId], geometry: &[Location]) -> Result<(), Error> {
    for (index, (&node, location)) in nodes.iter().zip(geometry).enumerate() {
        if location.id() != 0 && location.id() != node {
            log::debug!(
                "Geometry out of node order at index {index}: node {node}, location {}",
                location.id()
            );
            return Err(Error::OrderMismatch {
                index,
                node,
                location: location.id(),
            });
        }
    }
    Ok(())
}

impl Way {
    pub fn builder() -> WayBuilder {
        WayBuilder::new()
    }

    pub fn id(&self) -> WayId {
        self.id
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn geometry(&self) -> &[Location] {
        &self.geometry
    }

    pub fn oneway(&self) -> bool {
        self.oneway
    }

    pub fn variable(&self) -> bool {
        self.variable
    }

    pub fn conditional(&self) -> bool {
        self.conditional
    }

    /// Speed limit, `None` if there is no information
    pub fn limit(&self) -> Option<Speed> {
        self.limit
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        &self.tags
    }

    /// Assigns the geometry of a way built without one.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadySet`] if the way has a geometry already,
    /// [`Error::OrderMismatch`] if the locations do not follow the nodes.
    pub fn set_geometry(&mut self, geometry: impl IntoIterator<Item = Location>) -> Result<(), Error> {
        if !self.geometry.is_empty() {
            return Err(Error::AlreadySet);
        }
        let geometry: Vec<Location> = geometry.into_iter().collect();
        validate_order(&self.nodes, &geometry)?;
        self.geometry = geometry;
        self.boundary = OnceLock::new();
        Ok(())
    }

    /// Bounding box of the geometry, computed once
    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary
            .get_or_init(|| Location::boundary(&self.geometry, 0.0))
            .as_ref()
    }

    pub fn center(&self) -> Option<Location> {
        self.boundary().map(Boundary::center)
    }

    pub fn diameter(&self) -> Option<Diameter> {
        self.boundary().map(Boundary::diameter)
    }

    /// Length of the polyline in meters
    pub fn length(&self) -> f64 {
        self.geometry
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance_to(b))
            .sum()
    }

    /// Time spent between the first and the last location
    pub fn duration(&self) -> TimeDelta {
        match (self.geometry.first(), self.geometry.last()) {
            (Some(first), Some(last)) => last.time() - first.time(),
            _ => TimeDelta::zero(),
        }
    }

    pub fn average_speed(&self) -> Speed {
        let secs = seconds(self.duration());
        if secs == 0.0 {
            Speed::ZERO
        } else {
            Speed::from_mps(self.length() / secs)
        }
    }

    /// True if `item` lies within the bounding box of this way.
    ///
    /// Boxes crossing the date line are not handled.
    pub fn contains<T: Containable + ?Sized>(&self, item: &T) -> bool {
        self.boundary()
            .is_some_and(|boundary| item.is_contained_in(boundary))
    }

    /// Limit as stored in the serialized record, `-1.0` for no information
    pub(crate) fn limit_value(&self) -> f64 {
        self.limit.map_or(WayRecord::NO_LIMIT, f64::from)
    }
}

impl PartialEq for Way {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.oneway == other.oneway
            && self.variable == other.variable
            && self.conditional == other.conditional
            && self.limit_value() == other.limit_value()
            && self.geometry.len() == other.geometry.len()
            && self
                .geometry
                .iter()
                .zip(&other.geometry)
                .all(|(a, b)| a.coordinate() == b.coordinate())
    }
}

// Coordinates and limits are finite numbers
impl Eq for Way {}

impl Hash for Way {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // -0.0 and 0.0 compare equal and must hash alike
        fn bits(value: f64) -> u64 {
            (value + 0.0).to_bits()
        }

        self.id.hash(state);
        self.oneway.hash(state);
        self.variable.hash(state);
        self.conditional.hash(state);
        bits(self.limit_value()).hash(state);
        self.geometry.len().hash(state);
        for location in &self.geometry {
            bits(location.latitude()).hash(state);
            bits(location.longitude()).hash(state);
        }
    }
}

impl fmt::Display for Way {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Way({}):", self.id)?;
        match self.limit {
            Some(limit) if !limit.is_zero() => write!(f, " limit of {:.0} kmh", limit.kmh())?,
            _ => write!(f, " no limit")?,
        }
        if let (Some(first), Some(last)) = (self.geometry.first(), self.geometry.last()) {
            write!(f, "\n from {first}\n to   {last}")?;
        }
        Ok(())
    }
}
