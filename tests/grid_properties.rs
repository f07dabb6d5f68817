//! Property tests for grid geometry, terrain and placement invariants.

use homestead::{
    find_path, floor_to_cell, cell_origin, new_object_id, Connectivity, GridMap, GridPos,
    GridSize, MapKind, TerrainType, WorldPoint,
};
use proptest::prelude::*;

fn terrain() -> impl Strategy<Value = TerrainType> {
    prop_oneof![
        Just(TerrainType::Grass),
        Just(TerrainType::Water),
        Just(TerrainType::Rock),
        Just(TerrainType::Buildable),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Cell index and cell origin agree for every in-range cell.
    #[test]
    fn prop_floor_inverts_origin(cell in -100_000i32..100_000, size in 0.5f32..128.0) {
        prop_assert_eq!(floor_to_cell(cell_origin(cell, size), size), cell);
    }

    /// Grid to world and back is the identity on the grid.
    #[test]
    fn prop_grid_world_round_trip(
        width in 1u32..64,
        height in 1u32..64,
        tile_size in 1.0f32..100.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let map = GridMap::new(MapKind::HomeVillage, width, height, tile_size).unwrap();
        let pos = GridPos::new(
            (fx * width as f64) as i32,
            (fy * height as f64) as i32,
        );
        prop_assert_eq!(map.world_to_grid(map.grid_to_world(pos)), pos);
        prop_assert_eq!(map.world_to_grid(map.grid_to_world_center(pos)), pos);
    }

    /// Any world point lands in the cell whose bounds contain it.
    #[test]
    fn prop_world_point_in_cell_bounds(
        x in -2_000.0f32..2_000.0,
        y in -2_000.0f32..2_000.0,
        tile_size in 1.0f32..100.0,
    ) {
        let map = GridMap::new(MapKind::BattleMap, 8, 8, tile_size).unwrap();
        let cell = map.world_to_grid(WorldPoint::new(x, y));
        let low = map.grid_to_world(cell);
        let high = map.grid_to_world(GridPos::new(cell.x + 1, cell.y + 1));
        prop_assert!(low.x <= x && x < high.x);
        prop_assert!(low.y <= y && y < high.y);
    }

    /// Validity is exactly the rectangle bounds, and tiles exist only there.
    #[test]
    fn prop_validity_matches_bounds(
        width in 1u32..32,
        height in 1u32..32,
        x in -40i32..40,
        y in -40i32..40,
    ) {
        let map = GridMap::new(MapKind::HomeVillage, width, height, 32.0).unwrap();
        let inside = x >= 0 && y >= 0 && x < width as i32 && y < height as i32;
        prop_assert_eq!(map.is_valid_grid_pos(x, y), inside);
        prop_assert_eq!(map.tile(x, y).is_some(), inside);
        if !inside {
            prop_assert!(map.is_grid_pos_blocked(GridPos::new(x, y)));
        }
    }

    /// The buildable flag always follows the last terrain written.
    #[test]
    fn prop_set_terrain_tracks_buildable(
        writes in prop::collection::vec((0i32..6, 0i32..6, terrain()), 1..40),
    ) {
        let mut map = GridMap::new(MapKind::BuilderBase, 6, 6, 16.0).unwrap();
        for (x, y, terrain) in &writes {
            map.set_terrain(*x, *y, *terrain);
        }
        for (_, tile) in map.tiles() {
            prop_assert_eq!(tile.is_buildable(), tile.terrain().is_buildable());
        }
        let (x, y, last) = writes[writes.len() - 1];
        prop_assert_eq!(map.tile(x, y).map(|t| t.terrain()), Some(last));
    }

    /// Placement succeeds exactly when the check says it will, and removal
    /// restores the previous tiles.
    #[test]
    fn prop_place_matches_can_place(
        blocked in prop::collection::vec((0i32..8, 0i32..8), 0..10),
        ox in -2i32..9,
        oy in -2i32..9,
        w in 0u32..4,
        h in 0u32..4,
    ) {
        let mut map = GridMap::new(MapKind::HomeVillage, 8, 8, 32.0).unwrap();
        for (x, y) in &blocked {
            map.set_terrain(*x, *y, TerrainType::Water);
        }
        let before: Vec<_> = map.tiles().map(|(_, t)| *t).collect();

        let origin = GridPos::new(ox, oy);
        let footprint = GridSize::new(w, h);
        let expected = map.can_place_building(origin, footprint);
        let id = new_object_id();
        prop_assert_eq!(map.place_building(id, origin, footprint), expected);

        if expected {
            let occupied = map.tiles().filter(|(_, t)| t.occupant() == Some(id)).count();
            prop_assert_eq!(occupied as u64, footprint.area());
            prop_assert!(map.remove_building(id));
        }
        let after: Vec<_> = map.tiles().map(|(_, t)| *t).collect();
        prop_assert_eq!(before, after);
    }

    /// Paths are contiguous, walkable, and join the requested endpoints.
    #[test]
    fn prop_paths_are_well_formed(
        rocks in prop::collection::vec((0i32..10, 0i32..10), 0..30),
        start in (0i32..10, 0i32..10),
        end in (0i32..10, 0i32..10),
        eight in any::<bool>(),
    ) {
        let mut map = GridMap::new(MapKind::BattleMap, 10, 10, 32.0).unwrap();
        for (x, y) in &rocks {
            map.set_terrain(*x, *y, TerrainType::Rock);
        }
        let connectivity = if eight { Connectivity::Eight } else { Connectivity::Four };
        let start = GridPos::new(start.0, start.1);
        let end = GridPos::new(end.0, end.1);
        let path = find_path(&map, start, end, connectivity);

        if path.is_empty() {
            prop_assert!(start != end);
        } else {
            prop_assert_eq!(path[0], start);
            prop_assert_eq!(path[path.len() - 1], end);
            for step in path.windows(2) {
                let dx = step[0].x.abs_diff(step[1].x);
                let dy = step[0].y.abs_diff(step[1].y);
                prop_assert!(dx <= 1 && dy <= 1 && dx + dy > 0);
                if !eight {
                    prop_assert_eq!(dx + dy, 1);
                }
                prop_assert!(!map.is_grid_pos_blocked(step[1]));
            }
        }
    }
}
