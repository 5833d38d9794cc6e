use tracing::trace;

use crate::infra::{Direction, PolicyError};
use crate::planners::random::RandomSource;
use crate::planners::table::DirectionTable;
use crate::state::Grid;

use super::{Greedy, Strategy, TableDriven};

/// How often each branch of a `Blended` strategy was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchUsage {
    pub greedy: usize,
    pub table: usize,
}

impl BranchUsage {
    pub fn total(&self) -> usize {
        self.greedy + self.table
    }

    pub fn greedy_share(&self) -> f64 {
        if self.total() > 0 {
            self.greedy as f64 / self.total() as f64
        } else {
            0.0
        }
    }
}

/// Chooses per step between the greedy rule and the table's first move.
///
/// A draw `u` in `(0, 1]` selects greedy when `u <= alpha`, so an alpha of 0
/// is purely table-driven and an alpha of 1 purely greedy. Alpha is clamped to
/// `[0, 1]`.
pub struct Blended<'a, R: RandomSource> {
    greedy: Greedy<'a>,
    table: TableDriven<'a>,
    alpha: f64,
    random: R,
    usage: BranchUsage,
    label: String,
}

impl<'a, R: RandomSource> Blended<'a, R> {
    pub fn new(grid: &'a Grid, table: &'a DirectionTable, alpha: f64, random: R) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self {
            greedy: Greedy::new(grid),
            table: TableDriven::new(table),
            alpha,
            random,
            usage: BranchUsage::default(),
            label: format!("Piecewise Function (alpha = {})", alpha),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn usage(&self) -> BranchUsage {
        self.usage
    }
}

impl<R: RandomSource> Strategy for Blended<'_, R> {
    fn name(&self) -> &str {
        &self.label
    }

    fn next_action(&mut self, observation: usize) -> Result<Option<Direction>, PolicyError> {
        let draw = self.random.next_unit();
        let action = if draw <= self.alpha {
            self.usage.greedy += 1;
            self.greedy.action_for(observation)?
        } else {
            self.usage.table += 1;
            self.table.action_for(observation)?
        };
        trace!(observation, draw, ?action, "blended choice");
        Ok(Some(action))
    }
}
