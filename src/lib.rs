//! Spiderfy core: lays out records anchored to region centroids so that
//! collocated markers stay individually visible.
//!
//! Pipeline:
//! records + region geometry -> centroid join -> spiderfy layout -> connector lines,
//! with the ranking-ordered legend available on the finished layout.

pub mod config;
pub mod error;
pub mod geodata;
pub mod input;
pub mod layout;
pub mod legend;
pub mod output;
pub mod palette;
pub mod ranking;
pub mod record;
pub mod wasm;

use indexmap::IndexMap;

pub use config::{LineStyle, MapConfig};
pub use error::{GeometryError, InputError, ProjectionError};
pub use geodata::{
    join_records, AnchorKey, CylindricalEqualArea, GeoCoord, JoinMiss, JoinOutcome, JoinedRecord,
    Projection, ProjectionConfig, RegionGeometry,
};
pub use layout::{
    connector_lines, layout_records, spiderfy, AnchorGroup, ConnectorLine, LayoutConfig, LayoutResult,
    PlacedRecord, KM_PER_DEGREE,
};
pub use legend::project_legend;
pub use output::MapOutput;
pub use ranking::{RankingKey, RANK_SENTINEL};
pub use record::{Record, RecordBatch};

/// Everything the renderer needs for one record set.
#[derive(Debug, Clone, Default)]
pub struct MapLayout {
    /// Placed records in join order.
    pub placed: Vec<PlacedRecord>,
    pub groups: Vec<AnchorGroup>,
    /// One connector per placed record, same order.
    pub lines: Vec<ConnectorLine>,
    /// Records that had no region.
    pub dropped: Vec<JoinMiss>,
}

impl MapLayout {
    /// Per-category records sorted by ranking key.
    pub fn legend(&self) -> IndexMap<&str, Vec<&PlacedRecord>> {
        project_legend(&self.placed)
    }
}

/// Run the full pipeline over one record set.
pub fn build_map(records: Vec<Record>, regions: &RegionGeometry, cfg: &MapConfig) -> Result<MapLayout, GeometryError> {
    let projection = CylindricalEqualArea::new(&cfg.projection)?;
    let JoinOutcome { joined, dropped } = join_records(records, regions, &projection)?;
    let LayoutResult { placed, groups } = layout_records(joined, &cfg.layout);
    let lines = connector_lines(&placed);

    Ok(MapLayout {
        placed,
        groups,
        lines,
        dropped,
    })
}
