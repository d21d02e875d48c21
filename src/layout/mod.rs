// Spiderfy layout for collocated records.
//
// Goals:
// - Deterministic: no randomness; same ordered input => bit-identical output
// - Collocated records (same anchor key) are spread on a circle around the anchor
// - Singletons stay exactly on their anchor
// - Every record gets a connector line back to its anchor, even zero-length ones
//
// Submodules:
// - grouping: order-stable partition of records by anchor key
// - spiderfy: radial placement per group
// - connectors: anchor -> display line segments
//
// Known limitation: the radius is converted to degrees with a flat
// 111 km/degree factor. Longitude is not corrected for latitude, so circles
// become slightly elliptical away from the equator. This is kept on purpose.

use serde::{Deserialize, Serialize};

use crate::geodata::{AnchorKey, GeoCoord, JoinedRecord};
use crate::record::Record;

mod connectors;
mod grouping;
mod spiderfy;

pub use connectors::{connector_lines, ConnectorLine};
pub use grouping::group_by_anchor;
pub use spiderfy::{layout_records, radial_positions, spiderfy};

/// Kilometres per degree used for the radius conversion.
pub const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of the spider circle, in kilometres.
    /// Zero or negative values collapse every group onto its anchor.
    pub radius_km: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { radius_km: 40.0 }
    }
}

impl LayoutConfig {
    pub fn radius_deg(&self) -> f64 {
        self.radius_km / KM_PER_DEGREE
    }
}

/// A joined record with its resolved display position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRecord {
    #[serde(flatten)]
    pub joined: JoinedRecord,
    pub display: GeoCoord,
}

impl PlacedRecord {
    pub fn record(&self) -> &Record {
        &self.joined.record
    }

    pub fn anchor(&self) -> GeoCoord {
        self.joined.anchor
    }

    pub fn category(&self) -> &str {
        &self.joined.record.category
    }

    pub fn ranking_text(&self) -> &str {
        &self.joined.record.ranking_text
    }
}

/// All records sharing one anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorGroup {
    pub anchor_key: AnchorKey,
    pub anchor: GeoCoord,
    /// Indices into the layout's record list, in input order.
    pub members: Vec<usize>,
}

impl AnchorGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_spread(&self) -> bool {
        self.members.len() > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    /// Placed records, in the same order as the layout input.
    pub placed: Vec<PlacedRecord>,
    /// Groups in order of first appearance.
    pub groups: Vec<AnchorGroup>,
}
