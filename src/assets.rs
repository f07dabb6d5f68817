//! # Map Assets
//!
//! JSON map layouts that seed a map's geometry and initial terrain.
//!
//! A layout lists one string per grid row, top row first, with one terrain
//! symbol per tile (`g` grass, `w` water, `r` rock, `b` buildable):
//!
//! ```json
//! {
//!   "kind": "HomeVillage",
//!   "tile_size": 32.0,
//!   "rows": ["gggg", "gwwg", "gggg"]
//! }
//! ```

use crate::map::{GridMap, MapKind, TerrainType};
use crate::utils::Connectivity;
use crate::{HomesteadError, HomesteadResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable description of a map's geometry and terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    pub kind: MapKind,
    pub tile_size: f32,
    /// Pathfinding neighbourhood; eight-way when omitted
    #[serde(default)]
    pub connectivity: Connectivity,
    pub rows: Vec<String>,
}

impl MapLayout {
    /// Parses a layout from JSON text.
    pub fn from_json(json: &str) -> HomesteadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a layout file.
    pub fn load(path: impl AsRef<Path>) -> HomesteadResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let layout = Self::from_json(&text)?;
        info!("Loaded map layout {} ({} rows)", path.display(), layout.rows.len());
        Ok(layout)
    }

    /// Writes the layout as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> HomesteadResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Captures the terrain of an existing map. Occupancy is not recorded.
    pub fn from_map(map: &GridMap) -> Self {
        let width = map.width() as usize;
        let mut rows = vec![String::with_capacity(width); map.height() as usize];
        for (pos, tile) in map.tiles() {
            // `tiles()` only yields on-grid, non-negative positions.
            rows[pos.y as usize].push(tile.terrain().symbol());
        }

        Self {
            kind: map.kind(),
            tile_size: map.tile_size(),
            connectivity: map.connectivity(),
            rows,
        }
    }

    /// Builds a map from the layout.
    ///
    /// Fails on an empty or ragged layout, an unknown terrain symbol, or an
    /// unusable tile size.
    pub fn build(&self) -> HomesteadResult<GridMap> {
        let first = self
            .rows
            .first()
            .ok_or_else(|| HomesteadError::InvalidLayout("layout has no rows".to_string()))?;
        let width = first.chars().count();
        if width == 0 {
            return Err(HomesteadError::InvalidLayout("layout rows are empty".to_string()));
        }

        for (y, row) in self.rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(HomesteadError::InvalidLayout(format!(
                    "row {} has {} tiles, expected {}",
                    y, row_width, width
                )));
            }
        }

        let to_u32 = |n: usize| {
            u32::try_from(n).map_err(|_| HomesteadError::InvalidLayout(format!("dimension {} too large", n)))
        };
        let mut map = GridMap::new(self.kind, to_u32(width)?, to_u32(self.rows.len())?, self.tile_size)?
            .with_connectivity(self.connectivity);

        // GridMap::new guarantees both dimensions fit in i32.
        for (y, row) in self.rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let terrain = TerrainType::from_symbol(symbol).ok_or_else(|| {
                    HomesteadError::InvalidLayout(format!(
                        "unknown terrain symbol '{}' at ({}, {})",
                        symbol, x, y
                    ))
                })?;
                map.set_terrain(x as i32, y as i32, terrain);
            }
        }

        Ok(map)
    }
}

impl GridMap {
    /// Builds a map from a layout; see [`MapLayout::build`].
    pub fn from_layout(layout: &MapLayout) -> HomesteadResult<Self> {
        layout.build()
    }

    /// Loads and builds a map from a layout file.
    pub fn load(path: impl AsRef<Path>) -> HomesteadResult<Self> {
        MapLayout::load(path)?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::GridPos;

    const POND: &str = r#"{
        "kind": "BuilderBase",
        "tile_size": 16.0,
        "rows": ["gggb", "gwwg", "grgg"]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let layout = MapLayout::from_json(POND).unwrap();
        assert_eq!(layout.connectivity, Connectivity::Eight);

        let map = layout.build().unwrap();
        assert_eq!(map.kind(), MapKind::BuilderBase);
        assert_eq!((map.width(), map.height()), (4, 3));
        assert_eq!(map.tile_size(), 16.0);
        assert_eq!(map.tile(3, 0).unwrap().terrain(), TerrainType::Buildable);
        assert_eq!(map.tile(1, 1).unwrap().terrain(), TerrainType::Water);
        assert_eq!(map.tile(1, 2).unwrap().terrain(), TerrainType::Rock);
        assert!(!map.tile(2, 1).unwrap().is_buildable());
    }

    #[test]
    fn test_from_map_preserves_terrain() {
        let map = MapLayout::from_json(POND).unwrap().build().unwrap();
        let layout = MapLayout::from_map(&map);
        assert_eq!(layout.rows, vec!["gggb", "gwwg", "grgg"]);
        assert_eq!(layout.build().unwrap().tile_at(GridPos::new(2, 1)).unwrap().terrain(), TerrainType::Water);
    }

    #[test]
    fn test_ragged_layout_rejected() {
        let layout = MapLayout {
            kind: MapKind::HomeVillage,
            tile_size: 32.0,
            connectivity: Connectivity::Four,
            rows: vec!["ggg".to_string(), "gg".to_string()],
        };
        assert!(matches!(layout.build(), Err(HomesteadError::InvalidLayout(_))));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let layout = MapLayout {
            kind: MapKind::HomeVillage,
            tile_size: 32.0,
            connectivity: Connectivity::Four,
            rows: vec!["gg#g".to_string()],
        };
        let err = layout.build().unwrap_err();
        assert!(err.to_string().contains("'#' at (2, 0)"));
    }

    #[test]
    fn test_empty_layout_rejected() {
        let layout = MapLayout {
            kind: MapKind::HomeVillage,
            tile_size: 32.0,
            connectivity: Connectivity::Four,
            rows: Vec::new(),
        };
        assert!(matches!(layout.build(), Err(HomesteadError::InvalidLayout(_))));
    }

    #[test]
    fn test_bad_tile_size_rejected() {
        let layout = MapLayout {
            kind: MapKind::HomeVillage,
            tile_size: 0.0,
            connectivity: Connectivity::Four,
            rows: vec!["g".to_string()],
        };
        assert!(matches!(layout.build(), Err(HomesteadError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(MapLayout::from_json("{ not json"), Err(HomesteadError::Serde(_))));
    }
}
