//! Top-level configuration for building a map scene.

use serde::Deserialize;

use crate::geodata::ProjectionConfig;
use crate::layout::LayoutConfig;
use crate::palette::{CategoryPalette, Rgb};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [120, 120, 120],
            width: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub layout: LayoutConfig,
    pub projection: ProjectionConfig,
    pub palette: CategoryPalette,
    pub lines: LineStyle,
}
