use crate::infra::{Direction, PolicyError};
use crate::planners::rule::step_towards_goal;
use crate::state::Grid;

use super::Strategy;

/// Re-applies the next-tile rule to every observed tile.
#[derive(Debug, Clone, Copy)]
pub struct Greedy<'a> {
    grid: &'a Grid,
}

impl<'a> Greedy<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn action_for(&self, observation: usize) -> Result<Direction, PolicyError> {
        step_towards_goal(observation, self.grid).map(|(_, dir)| dir)
    }
}

impl Strategy for Greedy<'_> {
    fn name(&self) -> &str {
        "Define a Function"
    }

    fn next_action(&mut self, observation: usize) -> Result<Option<Direction>, PolicyError> {
        self.action_for(observation).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::GridShape;

    #[test]
    fn test_follows_observed_tile() {
        let grid =
            Grid::from_rows(&["SFFF", "FHFH", "FFFH", "HFFG"], GridShape::FOUR_BY_FOUR).unwrap();
        let mut strategy = Greedy::new(&grid);
        assert_eq!(strategy.next_action(0).unwrap(), Some(Direction::Down));
        // Slipped sideways onto tile 1: the hole below is avoided.
        assert_eq!(strategy.next_action(1).unwrap(), Some(Direction::Right));
        assert_eq!(strategy.next_action(3).unwrap(), Some(Direction::Left));
        assert_eq!(strategy.next_action(14).unwrap(), Some(Direction::Right));
        assert!(strategy.next_action(15).is_err());
    }
}
