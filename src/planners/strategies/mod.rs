//! Episode policies driven by the experiment runner.

mod blended;
mod fixed_sequence;
mod greedy;
mod table_driven;

pub use blended::{Blended, BranchUsage};
pub use fixed_sequence::FixedSequence;
pub use greedy::Greedy;
pub use table_driven::TableDriven;

use crate::infra::{Direction, PolicyError};

/// Picks the next move from the tile the simulator reports.
pub trait Strategy {
    fn name(&self) -> &str;

    /// Called after each simulator reset.
    fn begin_episode(&mut self) {}

    /// Next move for the observed tile, or `None` when the strategy has
    /// nothing left to play.
    fn next_action(&mut self, observation: usize) -> Result<Option<Direction>, PolicyError>;
}
