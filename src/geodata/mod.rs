// Region geometry and the centroid join.
//
// Regions are stored in geographic degrees (x = lon, y = lat) as `geo`
// geometries. Centroids are not taken in degrees: the join reprojects each
// region into a planar equal-area system, takes the centroid there and maps
// it back, so large regions are not distorted by the lat/lon grid.
//
// Submodules:
// - projection: planar equal-area reference system
// - join: record <-> region merge with miss diagnostics

use std::collections::HashMap;

use geo::{Coord, Geometry, Point};
use serde::{Deserialize, Serialize};

mod join;
mod projection;

pub use join::{join_records, projected_centroid, JoinMiss, JoinOutcome, JoinedRecord};
pub use projection::{CylindricalEqualArea, Projection, ProjectionConfig, AUTHALIC_RADIUS_M};

/// Integer code of an administrative region (e.g. an IBGE municipality code).
pub type AnchorKey = i64;

/// A geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Position in renderer order: `[lon, lat]`.
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<Coord<f64>> for GeoCoord {
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lon: c.x }
    }
}

impl From<Point<f64>> for GeoCoord {
    fn from(p: Point<f64>) -> Self {
        p.0.into()
    }
}

impl From<GeoCoord> for Coord<f64> {
    fn from(g: GeoCoord) -> Self {
        Coord { x: g.lon, y: g.lat }
    }
}

/// Region geometries keyed by anchor key. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct RegionGeometry {
    regions: HashMap<AnchorKey, Geometry<f64>>,
}

impl RegionGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the geometry of a region.
    pub fn insert(&mut self, key: AnchorKey, geometry: impl Into<Geometry<f64>>) {
        self.regions.insert(key, geometry.into());
    }

    pub fn get(&self, key: AnchorKey) -> Option<&Geometry<f64>> {
        self.regions.get(&key)
    }

    pub fn contains(&self, key: AnchorKey) -> bool {
        self.regions.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<G: Into<Geometry<f64>>> FromIterator<(AnchorKey, G)> for RegionGeometry {
    fn from_iter<I: IntoIterator<Item = (AnchorKey, G)>>(iter: I) -> Self {
        let mut out = RegionGeometry::new();
        for (key, g) in iter {
            out.insert(key, g);
        }
        out
    }
}
