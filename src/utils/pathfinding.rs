//! # Pathfinding Algorithms
//!
//! A* search over any [`TileQuery`] grid, used for unit movement.

use crate::map::{GridPos, TileQuery};
use pathfinding::prelude::astar;
use serde::{Deserialize, Serialize};

/// Cost of a horizontal or vertical step.
pub const STRAIGHT_COST: u32 = 10;

/// Cost of a diagonal step, 10·√2 rounded.
pub const DIAGONAL_COST: u32 = 14;

/// Neighbourhood used when expanding a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Connectivity {
    /// Cardinal steps only
    Four,
    /// Cardinal and diagonal steps; diagonals may not cut blocked corners
    #[default]
    Eight,
}

/// Admissible and consistent distance estimate between two tiles.
///
/// Manhattan distance for [`Connectivity::Four`], octile distance for
/// [`Connectivity::Eight`], both in step-cost units.
pub fn heuristic(from: GridPos, to: GridPos, connectivity: Connectivity) -> u32 {
    let dx = from.x.abs_diff(to.x);
    let dy = from.y.abs_diff(to.y);
    match connectivity {
        Connectivity::Four => STRAIGHT_COST * (dx + dy),
        Connectivity::Eight => {
            let (low, high) = if dx < dy { (dx, dy) } else { (dy, dx) };
            STRAIGHT_COST * (high - low) + DIAGONAL_COST * low
        }
    }
}

/// Walkable neighbours of `pos` with their step costs.
///
/// Order is fixed (N, W, E, S, then NW, NE, SW, SE) so searches are
/// reproducible. A diagonal step is only offered when both cardinal tiles it
/// passes between are walkable.
pub fn neighbors<Q>(map: &Q, pos: GridPos, connectivity: Connectivity) -> Vec<(GridPos, u32)>
where
    Q: TileQuery + ?Sized,
{
    let mut result: Vec<(GridPos, u32)> = pos
        .cardinal_adjacent_positions()
        .into_iter()
        .filter(|next| map.is_walkable(*next))
        .map(|next| (next, STRAIGHT_COST))
        .collect();

    if connectivity == Connectivity::Eight {
        for next in pos.diagonal_adjacent_positions() {
            let side_a = GridPos::new(next.x, pos.y);
            let side_b = GridPos::new(pos.x, next.y);
            if map.is_walkable(next) && map.is_walkable(side_a) && map.is_walkable(side_b) {
                result.push((next, DIAGONAL_COST));
            }
        }
    }

    result
}

/// Finds a shortest path from `start` to `end`, both ends included.
///
/// Returns `[start]` when `start == end` and `start` lies on the grid, and an
/// empty path when either end is off the grid, `end` is not walkable, or no
/// route exists. The start tile itself only has to be on the grid, so a unit
/// standing on an occupied tile can still walk out.
///
/// # Examples
///
/// ```
/// use homestead::{find_path, Connectivity, GridMap, GridPos, MapKind};
///
/// let map = GridMap::new(MapKind::HomeVillage, 5, 5, 32.0).unwrap();
/// let path = find_path(&map, GridPos::new(0, 0), GridPos::new(4, 0), Connectivity::Four);
/// assert_eq!(path.len(), 5);
/// ```
pub fn find_path<Q>(map: &Q, start: GridPos, end: GridPos, connectivity: Connectivity) -> Vec<GridPos>
where
    Q: TileQuery + ?Sized,
{
    if !map.is_valid_grid_pos(start.x, start.y) || !map.is_valid_grid_pos(end.x, end.y) {
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }
    if !map.is_walkable(end) {
        return Vec::new();
    }

    astar(
        &start,
        |pos| neighbors(map, *pos, connectivity),
        |pos| heuristic(*pos, end, connectivity),
        |pos| *pos == end,
    )
    .map(|(path, _cost)| path)
    .unwrap_or_default()
}

/// Total step cost of a path produced by [`find_path`].
pub fn path_cost(path: &[GridPos]) -> u32 {
    path.windows(2)
        .map(|step| {
            if step[0].x != step[1].x && step[0].y != step[1].y {
                DIAGONAL_COST
            } else {
                STRAIGHT_COST
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GridMap, MapKind, TerrainType};

    fn open_map(width: u32, height: u32) -> GridMap {
        GridMap::new(MapKind::HomeVillage, width, height, 1.0).unwrap()
    }

    #[test]
    fn test_heuristic_values() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 5);
        assert_eq!(heuristic(a, b, Connectivity::Four), 80);
        assert_eq!(heuristic(a, b, Connectivity::Eight), 3 * 14 + 2 * 10);
        assert_eq!(heuristic(b, b, Connectivity::Eight), 0);
    }

    #[test]
    fn test_heuristic_consistent_on_steps() {
        let goal = GridPos::new(7, 3);
        let pos = GridPos::new(2, 2);
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            let map = open_map(10, 10);
            for (next, cost) in neighbors(&map, pos, connectivity) {
                assert!(heuristic(pos, goal, connectivity) <= cost + heuristic(next, goal, connectivity));
            }
        }
    }

    #[test]
    fn test_neighbors_at_corner() {
        let map = open_map(3, 3);
        let four = neighbors(&map, GridPos::new(0, 0), Connectivity::Four);
        assert_eq!(four, vec![(GridPos::new(1, 0), 10), (GridPos::new(0, 1), 10)]);

        let eight = neighbors(&map, GridPos::new(0, 0), Connectivity::Eight);
        assert_eq!(eight.len(), 3);
        assert!(eight.contains(&(GridPos::new(1, 1), DIAGONAL_COST)));
    }

    #[test]
    fn test_no_corner_cutting() {
        let mut map = open_map(3, 3);
        map.set_terrain(1, 0, TerrainType::Rock);
        let eight = neighbors(&map, GridPos::new(0, 0), Connectivity::Eight);
        assert_eq!(eight, vec![(GridPos::new(0, 1), STRAIGHT_COST)]);
    }

    #[test]
    fn test_straight_line_path() {
        let map = open_map(10, 1);
        let path = find_path(&map, GridPos::new(1, 0), GridPos::new(8, 0), Connectivity::Eight);
        assert_eq!(path.len(), 8);
        assert_eq!(path.first(), Some(&GridPos::new(1, 0)));
        assert_eq!(path.last(), Some(&GridPos::new(8, 0)));
    }

    #[test]
    fn test_diagonal_path_is_shorter() {
        let map = open_map(6, 6);
        let start = GridPos::new(0, 0);
        let end = GridPos::new(5, 5);
        let eight = find_path(&map, start, end, Connectivity::Eight);
        let four = find_path(&map, start, end, Connectivity::Four);
        assert_eq!(eight.len(), 6);
        assert_eq!(four.len(), 11);
        assert_eq!(path_cost(&eight), 5 * DIAGONAL_COST);
        assert_eq!(path_cost(&four), 10 * STRAIGHT_COST);
    }

    #[test]
    fn test_deterministic() {
        let map = open_map(8, 8);
        let first = find_path(&map, GridPos::new(0, 0), GridPos::new(7, 4), Connectivity::Four);
        for _ in 0..10 {
            assert_eq!(
                find_path(&map, GridPos::new(0, 0), GridPos::new(7, 4), Connectivity::Four),
                first
            );
        }
    }

    #[test]
    fn test_off_grid_endpoints() {
        let map = open_map(4, 4);
        assert!(find_path(&map, GridPos::new(-1, 0), GridPos::new(2, 2), Connectivity::Four).is_empty());
        assert!(find_path(&map, GridPos::new(0, 0), GridPos::new(4, 0), Connectivity::Four).is_empty());
        assert!(find_path(&map, GridPos::new(9, 9), GridPos::new(9, 9), Connectivity::Four).is_empty());
    }

    #[test]
    fn test_blocked_goal() {
        let mut map = open_map(4, 4);
        map.set_terrain(3, 3, TerrainType::Water);
        assert!(find_path(&map, GridPos::new(0, 0), GridPos::new(3, 3), Connectivity::Eight).is_empty());
    }
}
