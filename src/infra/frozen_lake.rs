use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::state::{Grid, TileType};

use super::error::SimError;
use super::simulator::{Simulator, StepInfo, StepOutcome};
use super::types::Direction;

const HIGHLIGHT: &str = "\x1b[41m";
const RESET: &str = "\x1b[0m";

/// Simulator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrozenLakeConfig {
    /// Moves may slip to either perpendicular direction
    pub slippery: bool,
    /// Seed for the slip generator; seeded from the OS when absent
    pub seed: Option<u64>,
}

impl Default for FrozenLakeConfig {
    fn default() -> Self {
        Self {
            slippery: true,
            seed: None,
        }
    }
}

/// Reference lake: the agent starts on tile 0 and every move on a slippery lake
/// goes the intended way or either perpendicular way with equal probability.
/// Walking into the edge leaves the agent in place.
pub struct FrozenLake {
    grid: Grid,
    config: FrozenLakeConfig,
    rng: StdRng,
    position: Option<usize>,
    done: bool,
    last_action: Option<Direction>,
}

impl FrozenLake {
    pub fn new(grid: Grid, config: FrozenLakeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            grid,
            config,
            rng,
            position: None,
            done: false,
            last_action: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> FrozenLakeConfig {
        self.config
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    fn start_tile(&self) -> usize {
        self.grid
            .tiles()
            .iter()
            .position(|tile| *tile == TileType::Start)
            .unwrap_or(0)
    }

    fn resolve_slip(&mut self, intended: Direction) -> (Direction, f64) {
        if !self.config.slippery {
            return (intended, 1.0);
        }
        let [first, second] = intended.perpendicular();
        let candidates = [intended, first, second];
        let pick = self.rng.random_range(0..candidates.len());
        (candidates[pick], 1.0 / candidates.len() as f64)
    }
}

impl Simulator for FrozenLake {
    fn reset(&mut self) -> Result<usize, SimError> {
        let start = self.start_tile();
        self.position = Some(start);
        self.done = false;
        self.last_action = None;
        Ok(start)
    }

    fn step(&mut self, direction: Direction) -> Result<StepOutcome, SimError> {
        let position = self.position.ok_or(SimError::NotStarted)?;
        if self.done {
            return Err(SimError::EpisodeFinished);
        }

        let (taken, probability) = self.resolve_slip(direction);
        let next = taken.apply(position, self.grid.shape()).unwrap_or(position);
        let tile = self
            .grid
            .tile(next)
            .ok_or(SimError::InvalidObservation { observation: next })?;

        self.position = Some(next);
        self.last_action = Some(direction);
        self.done = tile.is_terminal();
        let reward = if tile == TileType::Goal { 1.0 } else { 0.0 };

        trace!(from = position, ?direction, ?taken, to = next, "lake step");

        Ok(StepOutcome {
            observation: next,
            reward,
            done: self.done,
            info: StepInfo { probability },
        })
    }

    fn render(&self) -> Result<String, SimError> {
        let mut output = String::new();
        if let Some(action) = self.last_action {
            output.push_str(&format!("  ({})\n", title_case(action)));
        }

        let width = self.grid.shape().width;
        for (index, tile) in self.grid.tiles().iter().enumerate() {
            if Some(index) == self.position {
                output.push_str(&format!("{}{}{}", HIGHLIGHT, tile.as_char(), RESET));
            } else {
                output.push(tile.as_char());
            }
            if index % width == width - 1 {
                output.push('\n');
            }
        }
        Ok(output)
    }
}

fn title_case(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "Left",
        Direction::Down => "Down",
        Direction::Right => "Right",
        Direction::Up => "Up",
    }
}
