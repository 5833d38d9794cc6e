use std::error::Error;
use std::fmt;

/// Failures of the deterministic path-policy engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    MalformedMap { reason: String },
    UnmappedDisplacement { current: usize, next: usize },
    PathBuild { start: usize, cap: usize },
    PositionOutOfRange { position: usize, goal: usize },
    NoRoute { tile: usize },
    InvalidShape { width: usize, height: usize },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolicyError::MalformedMap { reason } => {
                write!(formatter, "Malformed map: {}", reason)
            }
            PolicyError::UnmappedDisplacement { current, next } => {
                write!(formatter, "No direction leads from tile {} to tile {}", current, next)
            }
            PolicyError::PathBuild { start, cap } => {
                write!(formatter, "Path from tile {} did not reach the goal within {} steps", start, cap)
            }
            PolicyError::PositionOutOfRange { position, goal } => {
                write!(formatter, "Tile {} is outside the policy range 0..{}", position, goal)
            }
            PolicyError::NoRoute { tile } => {
                write!(formatter, "No route recorded for tile {}", tile)
            }
            PolicyError::InvalidShape { width, height } => {
                write!(formatter, "Grid shape {}x{} is too small", width, height)
            }
        }
    }
}

impl Error for PolicyError {}

/// Failures reported by a simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    NotStarted,
    EpisodeFinished,
    InvalidObservation { observation: usize },
    Failed { reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::NotStarted => write!(formatter, "Simulator stepped before reset"),
            SimError::EpisodeFinished => write!(formatter, "Simulator stepped after the episode ended"),
            SimError::InvalidObservation { observation } => {
                write!(formatter, "Simulator returned invalid observation {}", observation)
            }
            SimError::Failed { reason } => write!(formatter, "Simulator failed: {}", reason),
        }
    }
}

impl Error for SimError {}

/// Why a single episode was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeError {
    Policy(PolicyError),
    Simulator(SimError),
}

impl fmt::Display for EpisodeError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpisodeError::Policy(err) => write!(formatter, "policy: {}", err),
            EpisodeError::Simulator(err) => write!(formatter, "simulator: {}", err),
        }
    }
}

impl Error for EpisodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EpisodeError::Policy(err) => Some(err),
            EpisodeError::Simulator(err) => Some(err),
        }
    }
}

impl From<PolicyError> for EpisodeError {
    fn from(err: PolicyError) -> Self {
        EpisodeError::Policy(err)
    }
}

impl From<SimError> for EpisodeError {
    fn from(err: SimError) -> Self {
        EpisodeError::Simulator(err)
    }
}

/// Invalid value in the study configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: String,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Invalid value {:?} for {}", self.value, self.key)
    }
}

impl Error for ConfigError {}
