//! Study settings read from the environment (a `.env` file is loaded first by
//! the binary).

use std::env;
use std::str::FromStr;

use super::error::ConfigError;
use super::types::Direction;

pub const DEFAULT_MAP: &str = "SFFF/FHFH/FFFH/HFFG";
/// The hand-picked six-move path through the reference lake.
pub const DEFAULT_MANUAL_PATH: &str = "DDRRDR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyKind {
    Manual,
    Greedy,
    Table,
    Blended,
    All,
}

impl StudyKind {
    pub fn includes(self, other: StudyKind) -> bool {
        self == StudyKind::All || self == other
    }

    /// Table-driven and blended studies need the direction table built.
    pub fn needs_table(self) -> bool {
        self.includes(StudyKind::Table) || self.includes(StudyKind::Blended)
    }
}

impl FromStr for StudyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(StudyKind::Manual),
            "greedy" => Ok(StudyKind::Greedy),
            "table" => Ok(StudyKind::Table),
            "blended" => Ok(StudyKind::Blended),
            "all" => Ok(StudyKind::All),
            _ => Err(()),
        }
    }
}

/// Study configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    /// Lake rows, top to bottom
    pub map_rows: Vec<String>,
    /// Episodes per study, and per alpha in the sweep
    pub episodes: usize,
    /// Per-episode step cap
    pub max_episode_steps: usize,
    pub seed: Option<u64>,
    pub slippery: bool,
    pub study: StudyKind,
    pub manual_path: Vec<Direction>,
    /// Number of evenly spaced alpha values from 0 to 1
    pub alpha_steps: usize,
    /// Write CSV reports here when set
    pub report_dir: Option<String>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            map_rows: split_map(DEFAULT_MAP),
            episodes: 1000,
            max_episode_steps: 100,
            seed: None,
            slippery: true,
            study: StudyKind::All,
            manual_path: parse_directions(DEFAULT_MANUAL_PATH).unwrap_or_default(),
            alpha_steps: 11,
            report_dir: None,
        }
    }
}

impl StudyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(map) = lookup("FROSTPATH_MAP") {
            config.map_rows = split_map(&map);
        }
        if let Some(value) = lookup("FROSTPATH_EPISODES") {
            config.episodes = parse_value("FROSTPATH_EPISODES", &value)?;
        }
        if let Some(value) = lookup("FROSTPATH_MAX_STEPS") {
            config.max_episode_steps = parse_value("FROSTPATH_MAX_STEPS", &value)?;
        }
        if let Some(value) = lookup("FROSTPATH_SEED") {
            config.seed = Some(parse_value("FROSTPATH_SEED", &value)?);
        }
        if let Some(value) = lookup("FROSTPATH_SLIPPERY") {
            config.slippery = parse_value("FROSTPATH_SLIPPERY", &value)?;
        }
        if let Some(value) = lookup("FROSTPATH_STUDY") {
            config.study = parse_value("FROSTPATH_STUDY", &value)?;
        }
        if let Some(value) = lookup("FROSTPATH_MANUAL_PATH") {
            config.manual_path = parse_directions(&value).ok_or_else(|| ConfigError {
                key: "FROSTPATH_MANUAL_PATH".to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("FROSTPATH_ALPHA_STEPS") {
            config.alpha_steps = parse_value("FROSTPATH_ALPHA_STEPS", &value)?;
            if config.alpha_steps < 2 {
                return Err(ConfigError {
                    key: "FROSTPATH_ALPHA_STEPS".to_string(),
                    value,
                });
            }
        }
        config.report_dir = lookup("FROSTPATH_REPORT_DIR").filter(|dir| !dir.trim().is_empty());

        Ok(config)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn split_map(map: &str) -> Vec<String> {
    map.split(['/', '\n'])
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `DDRRDR`, `D,D,R` or the numeric form `1,1,2,2,1,2`.
pub fn parse_directions(text: &str) -> Option<Vec<Direction>> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            c.to_digit(10)
                .and_then(|digit| Direction::from_index(digit as usize))
                .or_else(|| Direction::from_letter(c))
        })
        .collect()
}
