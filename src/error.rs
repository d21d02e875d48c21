//! Error types for the geometry and input layers.
//!
//! Ranking parsing and join misses never produce errors; only structural
//! geometry failures and malformed input documents do.

use thiserror::Error;

use crate::geodata::AnchorKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid projection parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("coordinate ({x}, {y}) is outside the projection domain")]
    OutOfDomain { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("projection failed for region {key}")]
    Projection {
        key: AnchorKey,
        #[source]
        source: ProjectionError,
    },

    #[error("region {key} has no centroid (empty geometry)")]
    EmptyGeometry { key: AnchorKey },

    #[error(transparent)]
    Setup(#[from] ProjectionError),
}

impl GeometryError {
    /// Region key the failure refers to, if any.
    pub fn key(&self) -> Option<AnchorKey> {
        match self {
            GeometryError::Projection { key, .. } | GeometryError::EmptyGeometry { key } => Some(*key),
            GeometryError::Setup(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed input document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("region {key} has neither polygons nor a point")]
    MissingGeometry { key: AnchorKey },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
