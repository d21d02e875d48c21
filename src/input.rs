//! JSON input document: record batches, loose records, region geometries and config.

use geo::{Geometry, LineString, MultiPolygon, Point, Polygon};
use serde::Deserialize;

use crate::config::MapConfig;
use crate::error::InputError;
use crate::geodata::{AnchorKey, RegionGeometry};
use crate::record::{anchor_key_lenient, concat_batches, Record, RecordBatch};

/// `[lon, lat]` pairs; first ring is the exterior, the rest are holes.
pub type RingsInput = Vec<Vec<[f64; 2]>>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionInput {
    #[serde(deserialize_with = "anchor_key_lenient")]
    pub key: AnchorKey,
    #[serde(default)]
    pub polygons: Vec<RingsInput>,
    #[serde(default)]
    pub point: Option<[f64; 2]>,
}

impl RegionInput {
    pub fn into_geometry(self) -> Result<(AnchorKey, Geometry<f64>), InputError> {
        if !self.polygons.is_empty() {
            let polygons: Vec<Polygon<f64>> = self
                .polygons
                .into_iter()
                .filter_map(|rings| {
                    let mut rings = rings.into_iter().map(LineString::from);
                    let exterior = rings.next()?;
                    Some(Polygon::new(exterior, rings.collect()))
                })
                .collect();
            return Ok((self.key, MultiPolygon::new(polygons).into()));
        }
        match self.point {
            Some([lon, lat]) => Ok((self.key, Point::new(lon, lat).into())),
            None => Err(InputError::MissingGeometry { key: self.key }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapInput {
    /// Category-tagged source tables, concatenated in order.
    pub batches: Vec<RecordBatch>,
    /// Already-tagged records, appended after the batches.
    pub records: Vec<Record>,
    pub regions: Vec<RegionInput>,
    pub config: MapConfig,
}

impl MapInput {
    pub fn from_json(input: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn into_parts(self) -> Result<(Vec<Record>, RegionGeometry, MapConfig), InputError> {
        let mut records = concat_batches(self.batches);
        records.extend(self.records);

        let mut regions = RegionGeometry::new();
        for region in self.regions {
            let (key, geometry) = region.into_geometry()?;
            regions.insert(key, geometry);
        }

        Ok((records, regions, self.config))
    }
}
