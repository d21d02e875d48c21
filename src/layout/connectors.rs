// Connector lines from each anchor to the displayed marker.

use serde::Serialize;

use super::PlacedRecord;

/// A segment in renderer order: `[lon, lat]` endpoints.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ConnectorLine {
    pub source: [f64; 2],
    pub target: [f64; 2],
}

impl ConnectorLine {
    /// Singleton groups produce lines whose endpoints coincide.
    pub fn is_degenerate(&self) -> bool {
        self.source == self.target
    }
}

/// One line per placed record, in input order. No filtering or dedup.
pub fn connector_lines(placed: &[PlacedRecord]) -> Vec<ConnectorLine> {
    placed
        .iter()
        .map(|p| ConnectorLine {
            source: p.anchor().lon_lat(),
            target: p.display.lon_lat(),
        })
        .collect()
}
