// Radial placement of collocated records.
//
// For a group of n > 1 records around anchor (lat0, lon0) with radius r in
// degrees, member i goes to
//
//   angle_i = i * (2π / n)
//   lat     = lat0 + r * sin(angle_i)
//   lon     = lon0 + r * cos(angle_i)
//
// so the first member sits due east of the anchor and the rest follow
// counter-clockwise. A group of one stays on its anchor.

use std::f64::consts::TAU;

use tracing::info;

use super::{group_by_anchor, LayoutConfig, LayoutResult, PlacedRecord};
use crate::geodata::{GeoCoord, JoinedRecord};

/// Display positions for a group of `n` records sharing `anchor`.
pub fn radial_positions(anchor: GeoCoord, n: usize, radius_deg: f64) -> Vec<GeoCoord> {
    if n == 1 {
        return vec![anchor];
    }
    let step = TAU / n as f64;
    (0..n)
        .map(|i| {
            let angle = i as f64 * step;
            GeoCoord {
                lat: anchor.lat + radius_deg * angle.sin(),
                lon: anchor.lon + radius_deg * angle.cos(),
            }
        })
        .collect()
}

/// Lay out joined records. Output order equals input order.
pub fn layout_records(joined: Vec<JoinedRecord>, cfg: &LayoutConfig) -> LayoutResult {
    let groups = group_by_anchor(&joined);
    let radius_deg = cfg.radius_deg();

    let mut display: Vec<GeoCoord> = joined.iter().map(|j| j.anchor).collect();
    for group in &groups {
        let positions = radial_positions(group.anchor, group.len(), radius_deg);
        for (&member, pos) in group.members.iter().zip(positions) {
            display[member] = pos;
        }
    }

    info!(
        records = joined.len(),
        groups = groups.len(),
        spread_groups = groups.iter().filter(|g| g.is_spread()).count(),
        radius_km = cfg.radius_km,
        "spiderfy layout finished"
    );

    let placed = joined
        .into_iter()
        .zip(display)
        .map(|(joined, display)| PlacedRecord { joined, display })
        .collect();

    LayoutResult { placed, groups }
}

/// Place records with a circle radius given in kilometres.
pub fn spiderfy(joined: Vec<JoinedRecord>, radius_km: f64) -> Vec<PlacedRecord> {
    layout_records(joined, &LayoutConfig { radius_km }).placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::AnchorKey;
    use crate::layout::KM_PER_DEGREE;
    use crate::record::Record;

    const EPS: f64 = 1e-12;

    fn planar_distance_deg(a: GeoCoord, b: GeoCoord) -> f64 {
        ((a.lat - b.lat).powi(2) + (a.lon - b.lon).powi(2)).sqrt()
    }

    fn joined(key: AnchorKey, lat: f64, lon: f64) -> JoinedRecord {
        JoinedRecord {
            record: Record::new(key, "a", format!("{}", key)),
            anchor: GeoCoord::new(lat, lon),
        }
    }

    #[test]
    fn test_singleton_stays_on_anchor() {
        let placed = spiderfy(vec![joined(1, -15.78, -47.93)], 40.0);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].display, placed[0].anchor());
    }

    #[test]
    fn test_group_of_four_on_compass_points() {
        let anchor = GeoCoord::new(-10.0, -50.0);
        let r = 1.0;
        let pos = radial_positions(anchor, 4, r);
        let expected = [(0.0, 1.0), (1.0, 0.0), (0.0, -1.0), (-1.0, 0.0)];
        for (p, (dlat, dlon)) in pos.iter().zip(expected) {
            assert!((p.lat - (anchor.lat + dlat)).abs() < EPS, "{:?}", p);
            assert!((p.lon - (anchor.lon + dlon)).abs() < EPS, "{:?}", p);
        }
    }

    #[test]
    fn test_members_on_circle_with_equal_steps() {
        let recs: Vec<JoinedRecord> = (0..7).map(|_| joined(3, 2.0, 3.0)).collect();
        let placed = spiderfy(recs, 40.0);
        let r = 40.0 / KM_PER_DEGREE;

        for (i, p) in placed.iter().enumerate() {
            assert!((planar_distance_deg(p.anchor(), p.display) - r).abs() < 1e-9);
            let angle = (p.display.lat - 2.0).atan2(p.display.lon - 3.0).rem_euclid(TAU);
            let expected = i as f64 * TAU / 7.0;
            assert!((angle - expected).abs() < 1e-9, "member {} at {}", i, angle);
        }
    }

    #[test]
    fn test_groups_are_independent_and_order_preserved() {
        let recs = vec![
            joined(1, 0.0, 0.0),
            joined(2, 10.0, 10.0),
            joined(1, 0.0, 0.0),
            joined(3, 20.0, 20.0),
        ];
        let result = layout_records(recs, &LayoutConfig::default());
        let keys: Vec<AnchorKey> = result.placed.iter().map(|p| p.joined.anchor_key()).collect();
        assert_eq!(keys, vec![1, 2, 1, 3]);

        // Group 1 spread east then west; others on their anchors.
        let r = LayoutConfig::default().radius_deg();
        assert!((result.placed[0].display.lon - r).abs() < EPS);
        assert!((result.placed[2].display.lon + r).abs() < EPS);
        assert_eq!(result.placed[1].display, GeoCoord::new(10.0, 10.0));
        assert_eq!(result.placed[3].display, GeoCoord::new(20.0, 20.0));
        assert_eq!(result.groups.len(), 3);
    }

    #[test]
    fn test_non_positive_radius_collapses_to_anchor() {
        let recs: Vec<JoinedRecord> = (0..3).map(|_| joined(1, 5.0, 6.0)).collect();
        for p in spiderfy(recs, 0.0) {
            assert_eq!(p.display, GeoCoord::new(5.0, 6.0));
        }

        // Negative radius stays on the circle, mirrored through the anchor.
        let recs: Vec<JoinedRecord> = (0..2).map(|_| joined(1, 5.0, 6.0)).collect();
        let placed = spiderfy(recs, -111.0);
        assert!((placed[0].display.lon - 5.0).abs() < EPS);
    }

    #[test]
    fn test_empty_input() {
        let result = layout_records(Vec::new(), &LayoutConfig::default());
        assert!(result.placed.is_empty());
        assert!(result.groups.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let recs: Vec<JoinedRecord> = (0..20).map(|i| joined(i % 4, (i % 4) as f64, -((i % 4) as f64))).collect();
        let a = spiderfy(recs.clone(), 25.0);
        let b = spiderfy(recs, 25.0);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.display.lat.to_bits(), y.display.lat.to_bits());
            assert_eq!(x.display.lon.to_bits(), y.display.lon.to_bits());
        }
    }
}
