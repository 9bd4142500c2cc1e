//! Error types for the pipelining engine and workflow loader.

use thiserror::Error;

/// Invalid simulation configuration.
///
/// These are caller contract violations and are never coerced to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The search grid step must be positive or the scan never advances
    #[error("Invalid configuration: stagger_step_sec must be positive (got {0})")]
    InvalidStaggerStep(u64),

    /// The parallel search needs at least one worker
    #[error("Invalid configuration: threads must be positive (got {0})")]
    InvalidThreadCount(usize),

    /// The shared actuator is disabled, so nothing can be simulated
    #[error("Robot arm '{0}' is offline; enable it to run simulations")]
    RobotOffline(String),

    /// Plate duration times plate count does not fit in `u64` seconds
    #[error("Invalid configuration: {plates} plates of this workflow overflow the time axis")]
    TimeOverflow { plates: usize },
}

/// Errors from the parallel search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A worker thread panicked while evaluating a candidate
    #[error("Search worker panicked")]
    WorkerPanicked,
}

/// Errors raised while turning CSV text into tasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("CSV payload is required")]
    EmptyPayload,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unrecognized time format: {0}")]
    UnrecognizedTime(String),

    /// Line number (header is line 1) of a task too long to simulate
    #[error("Row {0} has a duration too large to simulate")]
    DurationOutOfRange(usize),
}

impl WorkflowError {
    /// Creates a missing-columns error.
    pub fn missing(columns: &[&str]) -> Self {
        Self::MissingColumns(columns.iter().map(|c| c.to_string()).collect())
    }

    /// Creates an unrecognized-time error.
    pub fn time(value: impl Into<String>) -> Self {
        Self::UnrecognizedTime(value.into())
    }
}
