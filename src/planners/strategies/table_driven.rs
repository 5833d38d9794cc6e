use crate::infra::{Direction, PolicyError};
use crate::planners::table::DirectionTable;

use super::Strategy;

/// Plays the first move of the precomputed route for the observed tile.
///
/// Later moves of a route are never replayed: a slip changes the tile, and the
/// new tile has its own route.
#[derive(Debug, Clone, Copy)]
pub struct TableDriven<'a> {
    table: &'a DirectionTable,
}

impl<'a> TableDriven<'a> {
    pub fn new(table: &'a DirectionTable) -> Self {
        Self { table }
    }

    pub fn action_for(&self, observation: usize) -> Result<Direction, PolicyError> {
        self.table
            .first_action(observation)
            .ok_or(PolicyError::NoRoute { tile: observation })
    }
}

impl Strategy for TableDriven<'_> {
    fn name(&self) -> &str {
        "Extended List"
    }

    fn next_action(&mut self, observation: usize) -> Result<Option<Direction>, PolicyError> {
        self.action_for(observation).map(Some)
    }
}
