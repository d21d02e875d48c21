//! Ordered legend projection.
//!
//! Splits placed records by category and orders each category by its parsed
//! [`RankingKey`]. The sort is stable: records with equal keys keep their
//! relative input order, since attributes outside the key (organization name,
//! project number) are visible in the legend.

use indexmap::IndexMap;

use crate::layout::PlacedRecord;
use crate::ranking::RankingKey;

/// Categories in order of first appearance, each sorted ascending by ranking key.
pub fn project_legend(placed: &[PlacedRecord]) -> IndexMap<&str, Vec<&PlacedRecord>> {
    let mut sections: IndexMap<&str, Vec<&PlacedRecord>> = IndexMap::new();
    for p in placed {
        sections.entry(p.category()).or_default().push(p);
    }
    for members in sections.values_mut() {
        // sort_by_cached_key is stable
        members.sort_by_cached_key(|p| RankingKey::parse(p.ranking_text()));
    }
    sections
}
