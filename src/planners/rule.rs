//! Fixed-priority next-tile rule and the move that realises it.
//!
//! The rule is a heuristic tuned to the `SFFF/FHFH/FFFH/HFFG` lake. It checks
//! at most one fallback and trusts that the fallback tile is safe, which holds
//! for that layout but not for arbitrary maps (a last-column tile whose left
//! neighbour also falls back right will cycle). It is not a shortest-path
//! search.

use crate::infra::{Direction, GridShape, PolicyError};
use crate::state::Grid;

/// Next tile on the way to the goal from `position`.
///
/// Priority, with `w` the grid width:
/// 1. last column: down (`+w`), or left (`-1`) when the tile below is a hole
/// 2. last row: right (`+1`)
/// 3. otherwise: down (`+w`), or right (`+1`) when the tile below is a hole
pub fn next_tile(position: usize, grid: &Grid) -> Result<usize, PolicyError> {
    let shape = grid.shape();
    let goal = shape.goal();
    if position >= goal {
        return Err(PolicyError::PositionOutOfRange { position, goal });
    }

    let below = position + shape.width;
    let next = if shape.is_last_column(position) {
        if grid.is_hole(below) { position - 1 } else { below }
    } else if shape.is_last_row(position) {
        position + 1
    } else if grid.is_hole(below) {
        position + 1
    } else {
        below
    };

    Ok(next)
}

/// Direction that moves the agent from `current` to the adjacent `next`.
///
/// Left, down and right are what the rule produces; up (`-w`) is mapped as
/// well so that every `Direction` has an inverse here.
pub fn direction(current: usize, next: usize, shape: GridShape) -> Result<Direction, PolicyError> {
    Direction::ALL
        .into_iter()
        .find(|dir| dir.apply(current, shape) == Some(next))
        .ok_or(PolicyError::UnmappedDisplacement { current, next })
}

/// One rule step: the next tile and the direction that reaches it.
pub fn step_towards_goal(position: usize, grid: &Grid) -> Result<(usize, Direction), PolicyError> {
    let next = next_tile(position, grid)?;
    let dir = direction(position, next, grid.shape())?;
    Ok((next, dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TileType;

    fn reference() -> Grid {
        Grid::from_rows(&["SFFF", "FHFH", "FFFH", "HFFG"], GridShape::FOUR_BY_FOUR).unwrap()
    }

    #[test]
    fn test_next_tile_on_reference_map() {
        let grid = reference();
        let expected = [4, 2, 6, 2, 8, 9, 10, 6, 9, 13, 14, 15, 13, 14, 15];
        for (tile, want) in expected.iter().enumerate() {
            assert_eq!(next_tile(tile, &grid).unwrap(), *want, "tile {}", tile);
        }
    }

    #[test]
    fn test_next_tile_never_enters_a_hole() {
        let grid = reference();
        for tile in 0..15 {
            let next = next_tile(tile, &grid).unwrap();
            assert_ne!(grid.tile(next), Some(TileType::Hole), "tile {} -> {}", tile, next);
        }
    }

    #[test]
    fn test_last_column_falls_back_left() {
        let grid = reference();
        assert_eq!(next_tile(3, &grid).unwrap(), 2);
        assert_eq!(direction(3, 2, grid.shape()).unwrap(), Direction::Left);
    }

    #[test]
    fn test_start_moves_down() {
        let grid = reference();
        assert_eq!(next_tile(0, &grid).unwrap(), 4);
        assert_eq!(direction(0, 4, grid.shape()).unwrap(), Direction::Down);
    }

    #[test]
    fn test_next_tile_rejects_goal_and_beyond() {
        let grid = reference();
        assert_eq!(
            next_tile(15, &grid),
            Err(PolicyError::PositionOutOfRange {
                position: 15,
                goal: 15
            })
        );
        assert!(next_tile(40, &grid).is_err());
    }

    #[test]
    fn test_direction_round_trip_for_rule_moves() {
        let grid = reference();
        let shape = grid.shape();
        for tile in 0..15 {
            let next = next_tile(tile, &grid).unwrap();
            let dir = direction(tile, next, shape).unwrap();
            assert_eq!(dir.apply(tile, shape), Some(next));
        }
    }

    #[test]
    fn test_direction_maps_up() {
        let shape = GridShape::FOUR_BY_FOUR;
        assert_eq!(direction(9, 5, shape).unwrap(), Direction::Up);
        assert_eq!(direction(5, 6, shape).unwrap(), Direction::Right);
    }

    #[test]
    fn test_direction_rejects_non_adjacent_pairs() {
        let shape = GridShape::FOUR_BY_FOUR;
        assert_eq!(
            direction(0, 2, shape),
            Err(PolicyError::UnmappedDisplacement { current: 0, next: 2 })
        );
        // +1 across a row boundary is not a move to the right.
        assert!(direction(3, 4, shape).is_err());
        assert!(direction(4, 3, shape).is_err());
        assert!(direction(6, 6, shape).is_err());
    }

    #[test]
    fn test_rule_scales_with_grid_width() {
        let grid = Grid::from_layout(&["SFFFF", "FFFHF", "FFFFH", "FFFFG"]).unwrap();
        // Last column, hole below: step left.
        assert_eq!(next_tile(9, &grid).unwrap(), 8);
        // Interior, hole below: step right.
        assert_eq!(next_tile(3, &grid).unwrap(), 4);
        // Last row: step right.
        assert_eq!(next_tile(15, &grid).unwrap(), 16);
        assert_eq!(step_towards_goal(0, &grid).unwrap(), (5, Direction::Down));
    }
}
