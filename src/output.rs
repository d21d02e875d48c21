//! Output types for the map front-end.
//!
//! These structs are serialized to JSON and handed to the point, line and
//! legend layers of the renderer.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::MapConfig;
use crate::error::InputError;
use crate::geodata::{AnchorKey, JoinMiss};
use crate::layout::PlacedRecord;
use crate::palette::Rgb;
use crate::ranking::RankingKey;
use crate::MapLayout;

/// A marker ready for the point and text layers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOutput {
    pub anchor_key: AnchorKey,
    /// Display position `[lon, lat]`
    pub position: [f64; 2],
    /// Region centroid `[lon, lat]`
    pub anchor: [f64; 2],
    pub category: String,
    pub color: Rgb,
    /// Label text: the raw ranking string
    pub label: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

/// A connector from anchor to marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOutput {
    pub source: [f64; 2],
    pub target: [f64; 2],
    pub color: Rgb,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub rank: RankingKey,
    pub anchor_key: AnchorKey,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSection {
    pub category: String,
    pub color: Rgb,
    pub entries: Vec<LegendEntry>,
}

/// Error information for the front-end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    /// Region the failure refers to, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<AnchorKey>,
}

impl From<&InputError> for ErrorInfo {
    fn from(err: &InputError) -> Self {
        let key = match err {
            InputError::Geometry(g) => g.key(),
            InputError::MissingGeometry { key } => Some(*key),
            InputError::Json(_) => None,
        };
        Self { message: err.to_string(), key }
    }
}

/// The combined output sent to the front-end
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<PointOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<LegendSection>,
    /// Records that had no region and were left out
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<JoinMiss>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl MapOutput {
    pub fn from_layout(layout: &MapLayout, cfg: &MapConfig) -> Self {
        let palette = &cfg.palette;

        let mut unknown: HashSet<&str> = HashSet::new();
        for p in &layout.placed {
            if !palette.contains(p.category()) && unknown.insert(p.category()) {
                warn!(category = p.category(), "no palette color for category; using fallback");
            }
        }

        let points = layout
            .placed
            .iter()
            .map(|p| PointOutput {
                anchor_key: p.joined.anchor_key(),
                position: p.display.lon_lat(),
                anchor: p.anchor().lon_lat(),
                category: p.category().to_string(),
                color: palette.color_for(p.category()),
                label: p.ranking_text().to_string(),
                attributes: p.record().attributes.clone(),
            })
            .collect();

        let lines = layout
            .lines
            .iter()
            .map(|l| LineOutput {
                source: l.source,
                target: l.target,
                color: cfg.lines.color,
                width: cfg.lines.width,
            })
            .collect();

        // Palette order first, unknown categories after in order of appearance.
        let mut sections: Vec<(&str, Vec<&PlacedRecord>)> = layout.legend().into_iter().collect();
        sections.sort_by_key(|(category, _)| palette.rank_of(category).unwrap_or(usize::MAX));

        let legend = sections
            .into_iter()
            .map(|(category, members)| LegendSection {
                category: category.to_string(),
                color: palette.color_for(category),
                entries: members
                    .into_iter()
                    .map(|p| LegendEntry {
                        label: p.ranking_text().to_string(),
                        rank: RankingKey::parse(p.ranking_text()),
                        anchor_key: p.joined.anchor_key(),
                        attributes: p.record().attributes.clone(),
                    })
                    .collect(),
            })
            .collect();

        MapOutput {
            points,
            lines,
            legend,
            dropped: layout.dropped.clone(),
            error: None,
        }
    }

    pub fn from_error(err: &InputError) -> Self {
        MapOutput {
            error: Some(err.into()),
            ..Default::default()
        }
    }
}
