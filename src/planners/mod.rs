pub mod metrics;
pub mod random;
pub mod rule;
pub mod runner;
pub mod strategies;
pub mod table;

pub use metrics::{EpisodeOutcome, OutcomeCounts, SweepStatistics};
pub use random::{RandomSource, RngSource};
pub use rule::{direction, next_tile, step_towards_goal};
pub use runner::{AlphaPoint, AlphaSweep, ExperimentRunner, alpha_steps};
pub use strategies::{Blended, BranchUsage, FixedSequence, Greedy, Strategy, TableDriven};
pub use table::DirectionTable;
