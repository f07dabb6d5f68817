//! Integration tests for loading and saving map layouts.

use homestead::{
    config, Connectivity, GridMap, GridPos, HomesteadError, MapKind, MapLayout, TerrainType,
    TerrainGenerator,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn bundled_home_village() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(config::HOME_VILLAGE_LAYOUT)
}

#[test]
fn test_bundled_home_village_loads() {
    let map = GridMap::load(bundled_home_village()).expect("bundled layout should load");

    assert_eq!(map.kind(), MapKind::HomeVillage);
    assert_eq!(map.width(), config::DEFAULT_MAP_WIDTH);
    assert_eq!(map.height(), config::DEFAULT_MAP_HEIGHT);
    assert_eq!(map.tile_size(), config::DEFAULT_TILE_SIZE);
    assert_eq!(map.connectivity(), Connectivity::Eight);
    assert_eq!(map.building_count(), 0);

    let count = |terrain: TerrainType| map.tiles().filter(|(_, t)| t.terrain() == terrain).count();
    assert!(count(TerrainType::Water) > 0);
    assert!(count(TerrainType::Rock) > 0);
    assert!(count(TerrainType::Buildable) > 0);

    // Buildable flag tracks terrain everywhere after loading.
    assert!(map
        .tiles()
        .all(|(_, tile)| tile.is_buildable() == tile.terrain().is_buildable()));
}

#[test]
fn test_bundled_home_village_is_traversable() {
    let map = GridMap::load(bundled_home_village()).expect("bundled layout should load");
    let corner = GridPos::new(0, 0);
    let far = GridPos::new(map.width() as i32 - 1, map.height() as i32 - 1);
    let path = map.find_path(corner, far);
    assert_eq!(path.first(), Some(&corner));
    assert_eq!(path.last(), Some(&far));
}

#[test]
fn test_save_and_reload_generated_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("battle.json");

    let map = TerrainGenerator::new()
        .generate(MapKind::BattleMap, 20, 12, 24.0, 7)
        .unwrap();
    MapLayout::from_map(&map).save(&path).unwrap();

    let reloaded = GridMap::load(&path).unwrap();
    assert_eq!(reloaded.kind(), MapKind::BattleMap);
    assert_eq!(reloaded.size(), map.size());
    assert_eq!(reloaded.tile_size(), 24.0);
    for ((pos, before), (_, after)) in map.tiles().zip(reloaded.tiles()) {
        assert_eq!(before.terrain(), after.terrain(), "terrain differs at {}", pos);
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = GridMap::load(dir.path().join("nowhere.json"));
    assert!(matches!(result, Err(HomesteadError::Io(_))));
}

#[test]
fn test_malformed_files() {
    let dir = TempDir::new().unwrap();

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "not json at all").unwrap();
    assert!(matches!(GridMap::load(&garbage), Err(HomesteadError::Serde(_))));

    let ragged = dir.path().join("ragged.json");
    std::fs::write(
        &ragged,
        r#"{"kind": "HomeVillage", "tile_size": 32.0, "rows": ["ggg", "gg"]}"#,
    )
    .unwrap();
    assert!(matches!(GridMap::load(&ragged), Err(HomesteadError::InvalidLayout(_))));

    let bad_size = dir.path().join("bad_size.json");
    std::fs::write(
        &bad_size,
        r#"{"kind": "HomeVillage", "tile_size": 0.0, "rows": ["gg", "gg"]}"#,
    )
    .unwrap();
    assert!(matches!(GridMap::load(&bad_size), Err(HomesteadError::InvalidConfig(_))));
}
