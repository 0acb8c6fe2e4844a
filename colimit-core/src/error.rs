use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Speed unit must be one of mps, kmh, mph, fts, knots, got {0:?}")]
    InvalidUnit(String),
    #[error("Speed value must be a finite number, got {0}")]
    InvalidValue(f64),
    #[error("Geometries must meet order of nodes: node {node} at index {index}, location id {location}")]
    OrderMismatch {
        index: usize,
        node: NodeId,
        location: NodeId,
    },
    #[error("Geometries can only be set once")]
    AlreadySet,
    #[error("Invalid geometry configuration: {0}")]
    InvalidConfig(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
    #[error("WKT error: {0}")]
    Wkt(String),
}
