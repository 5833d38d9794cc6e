use std::fmt;

use tracing::debug;

use crate::infra::{Direction, PolicyError};
use crate::state::Grid;

use super::rule::step_towards_goal;

/// Per-tile direction sequences produced by walking the rule to the goal.
///
/// Entries exist for every tile below the goal, holes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionTable {
    routes: Vec<Vec<Direction>>,
}

impl DirectionTable {
    #[tracing::instrument(level = "debug", skip(grid))]
    pub fn build(grid: &Grid) -> Result<Self, PolicyError> {
        let goal = grid.goal();
        // A route that never revisits a tile is shorter than the grid.
        let cap = grid.len();

        let mut routes = Vec::with_capacity(goal);
        for start in 0..goal {
            let mut cursor = start;
            let mut route = Vec::new();
            while cursor != goal {
                if route.len() >= cap {
                    return Err(PolicyError::PathBuild { start, cap });
                }
                let (next, dir) = step_towards_goal(cursor, grid)?;
                route.push(dir);
                cursor = next;
            }
            debug!("route from tile {}: {} steps", start, route.len());
            routes.push(route);
        }

        Ok(Self { routes })
    }

    pub fn get(&self, tile: usize) -> Option<&[Direction]> {
        self.routes.get(tile).map(Vec::as_slice)
    }

    /// First move of the route from `tile`.
    pub fn first_action(&self, tile: usize) -> Option<Direction> {
        self.get(tile).and_then(|route| route.first().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Direction])> {
        self.routes
            .iter()
            .enumerate()
            .map(|(tile, route)| (tile, route.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn longest_route(&self) -> usize {
        self.routes.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl fmt::Display for DirectionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tile, route) in self.iter() {
            let names: Vec<&str> = route.iter().map(|dir| dir.as_str_name()).collect();
            writeln!(f, "h({}) = {}", tile, names.join(", "))?;
        }
        Ok(())
    }
}
