use crate::infra::{Direction, PolicyError};

use super::Strategy;

/// Replays a literal move list, ignoring where the agent actually is.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    moves: Vec<Direction>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(moves: Vec<Direction>) -> Self {
        Self { moves, cursor: 0 }
    }

    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }
}

impl Strategy for FixedSequence {
    fn name(&self) -> &str {
        "Manual Inspection"
    }

    fn begin_episode(&mut self) {
        self.cursor = 0;
    }

    fn next_action(&mut self, _observation: usize) -> Result<Option<Direction>, PolicyError> {
        let action = self.moves.get(self.cursor).copied();
        if action.is_some() {
            self.cursor += 1;
        }
        Ok(action)
    }
}
