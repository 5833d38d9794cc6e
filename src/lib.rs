pub mod infra;
pub mod planners;
pub mod state;

// Re-export commonly used types for convenience
pub use infra::{Direction, GridShape, PolicyError};
pub use planners::{DirectionTable, ExperimentRunner, Strategy};
pub use state::Grid;
