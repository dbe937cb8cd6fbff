//! Configuration system for CareRoster.
//!
//! Load solver configuration from TOML or YAML to control coverage mode,
//! time budget, parallelism and objective priorities without code changes.
//! Every key is optional.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use careroster_config::{CoverageMode, ObjectiveKind, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     coverage = "partial"
//!     time_limit_seconds = 30
//!     worker_count = 2
//!     objectives = ["travel_efficiency", "continuity"]
//! "#).unwrap();
//!
//! assert_eq!(config.coverage, CoverageMode::Partial);
//! assert_eq!(config.time_limit(), Duration::from_secs(30));
//! assert_eq!(config.objectives[0], ObjectiveKind::TravelEfficiency);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use careroster_config::SolverConfig;
//!
//! let config = SolverConfig::load("careroster.toml").unwrap_or_default();
//! assert_eq!(config.worker_count, 4);
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default wall-clock budget for one solve.
pub const DEFAULT_TIME_LIMIT_SECONDS: u64 = 300;

/// Default number of parallel search workers.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Whether every visit must be covered.
    pub coverage: CoverageMode,

    /// Wall-clock budget in seconds.
    pub time_limit_seconds: u64,

    /// Number of parallel search workers.
    pub worker_count: usize,

    /// Objectives in priority order; earlier entries dominate later ones.
    /// An empty list solves for feasibility only.
    pub objectives: Vec<ObjectiveKind>,

    /// How per caregiver-day neighborhood switches are combined.
    pub travel_aggregation: TravelAggregation,

    /// Seed for tie-breaking during search.
    pub random_seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            coverage: CoverageMode::default(),
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            worker_count: DEFAULT_WORKER_COUNT,
            objectives: vec![ObjectiveKind::Continuity, ObjectiveKind::TravelEfficiency],
            travel_aggregation: TravelAggregation::default(),
            random_seed: 0,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::Invalid("worker_count must be at least 1".into()));
        }
        for (i, objective) in self.objectives.iter().enumerate() {
            if self.objectives[..i].contains(objective) {
                return Err(ConfigError::Invalid(format!(
                    "objective {objective} listed more than once"
                )));
            }
        }
        Ok(())
    }

    pub fn with_coverage(mut self, coverage: CoverageMode) -> Self {
        self.coverage = coverage;
        self
    }

    /// Sets the time budget.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Replaces the objective priority order.
    pub fn with_objectives(mut self, objectives: impl IntoIterator<Item = ObjectiveKind>) -> Self {
        self.objectives = objectives.into_iter().collect();
        self
    }

    pub fn with_travel_aggregation(mut self, aggregation: TravelAggregation) -> Self {
        self.travel_aggregation = aggregation;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Returns the time budget as a Duration.
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_seconds)
    }
}

/// Coverage requirement for visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageMode {
    /// Every visit gets exactly one caregiver; otherwise the problem is infeasible.
    #[default]
    Strict,

    /// Every visit gets at most one caregiver; coverage is maximized first.
    Partial,
}

/// Optimization objectives that can be enabled and prioritized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    /// Minimize the largest number of distinct caregivers serving one customer.
    Continuity,

    /// Minimize neighborhood switches within caregiver-days.
    TravelEfficiency,
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveKind::Continuity => write!(f, "continuity"),
            ObjectiveKind::TravelEfficiency => write!(f, "travel_efficiency"),
        }
    }
}

/// Aggregation of per caregiver-day switch counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelAggregation {
    /// Minimize the total over all caregiver-days.
    #[default]
    Sum,

    /// Minimize the worst caregiver-day.
    Max,
}
