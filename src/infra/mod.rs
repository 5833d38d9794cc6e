mod config;
mod error;
mod frozen_lake;
mod report;
mod simulator;
mod types;

pub use config::{DEFAULT_MANUAL_PATH, DEFAULT_MAP, StudyConfig, StudyKind, parse_directions};
pub use error::{ConfigError, EpisodeError, PolicyError, SimError};
pub use frozen_lake::{FrozenLake, FrozenLakeConfig};
pub use report::{CompositeReport, ConsoleReport, CsvReport, ReportSink};
pub use simulator::{Simulator, StepInfo, StepOutcome};
pub use types::{Direction, GridShape};
