// Centroid join: attach each record to the centroid of its region.
//
// Records whose key has no region are dropped and reported as misses; that
// is a data-quality signal, not a failure. A region whose centroid cannot be
// computed (projection failure, empty geometry) aborts the join, because any
// coordinates produced from it would be meaningless.

use std::collections::HashMap;

use geo::{Centroid, Geometry, MapCoords};
use serde::Serialize;
use tracing::{debug, info};

use super::{AnchorKey, GeoCoord, Projection, RegionGeometry};
use crate::error::{GeometryError, ProjectionError};
use crate::record::Record;

/// A record with the centroid of its region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub anchor: GeoCoord,
}

impl JoinedRecord {
    pub fn anchor_key(&self) -> AnchorKey {
        self.record.anchor_key
    }
}

/// A record that was dropped because its key has no region.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct JoinMiss {
    /// Position of the record in the join input.
    pub index: usize,
    pub anchor_key: AnchorKey,
}

#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub joined: Vec<JoinedRecord>,
    pub dropped: Vec<JoinMiss>,
}

impl JoinOutcome {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Centroid of a geographic geometry, computed in the planar system of `projection`.
pub fn projected_centroid<P>(geometry: &Geometry<f64>, projection: &P) -> Result<Option<GeoCoord>, ProjectionError>
where
    P: Projection + ?Sized,
{
    let planar = geometry.try_map_coords(|c| projection.forward(c))?;
    match planar.centroid() {
        Some(c) => Ok(Some(projection.inverse(c.0)?.into())),
        None => Ok(None),
    }
}

/// Join records with region centroids. Input order is preserved.
pub fn join_records<P>(
    records: Vec<Record>,
    regions: &RegionGeometry,
    projection: &P,
) -> Result<JoinOutcome, GeometryError>
where
    P: Projection + ?Sized,
{
    let mut centroids: HashMap<AnchorKey, GeoCoord> = HashMap::new();
    let mut out = JoinOutcome::default();

    for (index, record) in records.into_iter().enumerate() {
        let key = record.anchor_key;
        let Some(geometry) = regions.get(key) else {
            debug!(index, anchor_key = key, "no region for record; dropping");
            out.dropped.push(JoinMiss { index, anchor_key: key });
            continue;
        };

        let anchor = match centroids.get(&key) {
            Some(c) => *c,
            None => {
                let c = projected_centroid(geometry, projection)
                    .map_err(|source| GeometryError::Projection { key, source })?
                    .ok_or(GeometryError::EmptyGeometry { key })?;
                centroids.insert(key, c);
                c
            }
        };

        out.joined.push(JoinedRecord { record, anchor });
    }

    info!(
        joined = out.joined.len(),
        dropped = out.dropped.len(),
        regions = centroids.len(),
        "centroid join finished"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::{CylindricalEqualArea, ProjectionConfig};
    use geo::{polygon, MultiPolygon, Point, Polygon};
    use serde_json::json;

    fn cea() -> CylindricalEqualArea {
        CylindricalEqualArea::new(&ProjectionConfig::default()).unwrap()
    }

    fn square(lon: f64, lat: f64, half: f64) -> Polygon<f64> {
        polygon![
            (x: lon - half, y: lat - half),
            (x: lon + half, y: lat - half),
            (x: lon + half, y: lat + half),
            (x: lon - half, y: lat + half),
        ]
    }

    #[test]
    fn test_drops_unmatched_and_keeps_order() {
        let regions: RegionGeometry = [(1, square(-47.0, -15.0, 0.5)), (2, square(-40.0, -10.0, 0.5))]
            .into_iter()
            .collect();
        let records = vec![
            Record::new(2, "a", "1"),
            Record::new(99, "a", "2"),
            Record::new(1, "b", "3").with_attribute("name", "Org"),
            Record::new(2, "b", "4"),
        ];

        let outcome = join_records(records, &regions, &cea()).unwrap();

        let keys: Vec<AnchorKey> = outcome.joined.iter().map(|j| j.anchor_key()).collect();
        assert_eq!(keys, vec![2, 1, 2]);
        assert_eq!(outcome.dropped, vec![JoinMiss { index: 1, anchor_key: 99 }]);
        assert_eq!(outcome.dropped_count(), 1);
        assert_eq!(outcome.joined[1].record.attributes.get("name"), Some(&json!("Org")));
        // Same region => bit-identical anchor.
        assert_eq!(outcome.joined[0].anchor, outcome.joined[2].anchor);
    }

    #[test]
    fn test_symmetric_square_centroid() {
        let c = projected_centroid(&square(-54.0, 0.0, 1.0).into(), &cea()).unwrap().unwrap();
        assert!((c.lon + 54.0).abs() < 1e-9);
        assert!(c.lat.abs() < 1e-9);
    }

    #[test]
    fn test_centroid_is_area_weighted_not_degree_weighted() {
        // 0..60 N band: equal-area centroid sits at asin(sin(60)/2) ~ 25.66, not 30.
        let band: Polygon<f64> = polygon![
            (x: -55.0, y: 0.0),
            (x: -53.0, y: 0.0),
            (x: -53.0, y: 60.0),
            (x: -55.0, y: 60.0),
        ];
        let c = projected_centroid(&band.into(), &cea()).unwrap().unwrap();
        let expected = ((60.0f64).to_radians().sin() / 2.0).asin().to_degrees();
        assert!((c.lat - expected).abs() < 1e-6, "lat {}", c.lat);
        assert!((c.lon + 54.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_region_round_trips() {
        let mut regions = RegionGeometry::new();
        regions.insert(7, Point::new(-38.5, -3.7));
        let outcome = join_records(vec![Record::new(7, "a", "")], &regions, &cea()).unwrap();
        let a = outcome.joined[0].anchor;
        assert!((a.lon + 38.5).abs() < 1e-9);
        assert!((a.lat + 3.7).abs() < 1e-9);
    }

    #[test]
    fn test_empty_geometry_is_fatal() {
        let mut regions = RegionGeometry::new();
        regions.insert(3, MultiPolygon::<f64>::new(vec![]));
        let err = join_records(vec![Record::new(3, "a", "1")], &regions, &cea()).unwrap_err();
        assert_eq!(err, GeometryError::EmptyGeometry { key: 3 });
    }

    #[test]
    fn test_projection_failure_is_fatal() {
        let mut regions = RegionGeometry::new();
        regions.insert(4, Point::new(0.0, 95.0));
        let err = join_records(vec![Record::new(4, "a", "1")], &regions, &cea()).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::Projection { key: 4, source: ProjectionError::OutOfDomain { .. } }
        ));
        assert_eq!(err.key(), Some(4));
    }

    #[test]
    fn test_unreferenced_bad_region_is_ignored() {
        let mut regions = RegionGeometry::new();
        regions.insert(4, Point::new(0.0, 95.0));
        regions.insert(5, Point::new(-50.0, -10.0));
        let outcome = join_records(vec![Record::new(5, "a", "1")], &regions, &cea()).unwrap();
        assert_eq!(outcome.joined.len(), 1);
    }
}
