//! Category colors for point markers and legend swatches.

use indexmap::IndexMap;
use serde::Deserialize;

pub type Rgb = [u8; 3];

/// Color used for categories missing from the table.
pub const FALLBACK_COLOR: Rgb = [128, 128, 128];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryPalette {
    pub colors: IndexMap<String, Rgb>,
    pub fallback: Rgb,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        let mut colors = IndexMap::new();
        colors.insert("Pequeno".to_string(), [52, 152, 219]);
        colors.insert("Consolidação".to_string(), [231, 76, 60]);
        Self {
            colors,
            fallback: FALLBACK_COLOR,
        }
    }
}

impl CategoryPalette {
    pub fn contains(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }

    pub fn color_for(&self, category: &str) -> Rgb {
        self.colors.get(category).copied().unwrap_or(self.fallback)
    }

    /// Position of a category in the table, if known. Used to order legend sections.
    pub fn rank_of(&self, category: &str) -> Option<usize> {
        self.colors.get_index_of(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let p = CategoryPalette::default();
        assert_eq!(p.color_for("Pequeno"), [52, 152, 219]);
        assert_eq!(p.color_for("Consolidação"), [231, 76, 60]);
        assert_eq!(p.color_for("Outro"), FALLBACK_COLOR);
        assert_eq!(p.rank_of("Consolidação"), Some(1));
        assert!(!p.contains("Outro"));
    }

    #[test]
    fn test_deserialize_partial_override() {
        let p: CategoryPalette =
            serde_json::from_str(r#"{ "colors": { "A": [1, 2, 3] } }"#).unwrap();
        assert_eq!(p.color_for("A"), [1, 2, 3]);
        assert_eq!(p.color_for("Pequeno"), FALLBACK_COLOR);
    }
}
