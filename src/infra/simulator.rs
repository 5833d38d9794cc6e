//! Gym-style interface to a stochastic lake.

use super::error::SimError;
use super::types::Direction;

/// Additional information from a step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepInfo {
    /// Probability of the transition that was taken
    pub probability: f64,
}

/// Step result from the simulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Tile the agent is on after the step
    pub observation: usize,
    /// 1.0 when the episode ended on the goal, 0.0 otherwise
    pub reward: f64,
    /// Episode ended (goal or hole)
    pub done: bool,
    pub info: StepInfo,
}

impl StepOutcome {
    pub fn reached_goal(&self) -> bool {
        self.done && self.reward >= 1.0
    }

    pub fn fell_in_hole(&self) -> bool {
        self.done && self.reward < 1.0
    }
}

/// Environment the strategies are evaluated against.
pub trait Simulator {
    /// Start a new episode and return the starting tile.
    fn reset(&mut self) -> Result<usize, SimError>;

    fn step(&mut self, direction: Direction) -> Result<StepOutcome, SimError>;

    /// Text rendering of the map, one row per line.
    fn render(&self) -> Result<String, SimError>;
}

impl<S: Simulator + ?Sized> Simulator for &mut S {
    fn reset(&mut self) -> Result<usize, SimError> {
        (**self).reset()
    }

    fn step(&mut self, direction: Direction) -> Result<StepOutcome, SimError> {
        (**self).step(direction)
    }

    fn render(&self) -> Result<String, SimError> {
        (**self).render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        let goal = StepOutcome {
            observation: 15,
            reward: 1.0,
            done: true,
            info: StepInfo::default(),
        };
        assert!(goal.reached_goal());
        assert!(!goal.fell_in_hole());

        let hole = StepOutcome {
            observation: 5,
            reward: 0.0,
            done: true,
            info: StepInfo::default(),
        };
        assert!(hole.fell_in_hole());

        let moving = StepOutcome {
            observation: 4,
            reward: 0.0,
            done: false,
            info: StepInfo::default(),
        };
        assert!(!moving.reached_goal());
        assert!(!moving.fell_in_hole());
    }
}
