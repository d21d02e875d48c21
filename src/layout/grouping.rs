// Order-stable grouping by anchor key.
//
// Groups come out in order of first appearance and members keep their input
// order, so the result never depends on hash iteration order.

use std::collections::HashMap;

use super::AnchorGroup;
use crate::geodata::{AnchorKey, JoinedRecord};

/// Partition joined records by anchor key.
///
/// The group anchor is taken from the first member. All members of a group
/// are expected to carry the same anchor, which holds when the records come
/// out of the centroid join (one centroid per key). Checked in debug builds.
pub fn group_by_anchor(joined: &[JoinedRecord]) -> Vec<AnchorGroup> {
    let mut index_of: HashMap<AnchorKey, usize> = HashMap::new();
    let mut groups: Vec<AnchorGroup> = Vec::new();

    for (i, rec) in joined.iter().enumerate() {
        let key = rec.anchor_key();
        match index_of.get(&key) {
            Some(&g) => {
                debug_assert_eq!(
                    groups[g].anchor, rec.anchor,
                    "records with anchor key {} disagree on the anchor coordinate",
                    key
                );
                groups[g].members.push(i);
            }
            None => {
                index_of.insert(key, groups.len());
                groups.push(AnchorGroup {
                    anchor_key: key,
                    anchor: rec.anchor,
                    members: vec![i],
                });
            }
        }
    }

    groups
}
