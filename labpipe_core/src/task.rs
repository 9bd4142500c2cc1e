//! Workflow task model.
//!
//! A workflow is an ordered list of [`Task`]s executed back-to-back for
//! every plate. Only [`TaskKind::SharedActuator`] tasks contend for the
//! robot arm; everything else runs on its own instrument.

use serde::{Deserialize, Serialize};

/// Which resource class a task occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    /// Occupies the single shared actuator (the "MOVE Function" rows).
    SharedActuator,

    /// Runs on an independent, non-contended instrument.
    Standalone,
}

impl TaskKind {
    /// Returns true if this task contends for the shared actuator.
    pub fn is_shared_actuator(&self) -> bool {
        matches!(self, TaskKind::SharedActuator)
    }

    /// Returns the short display name.
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::SharedActuator => "move",
            TaskKind::Standalone => "instrument",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One step of a plate's workflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Human-readable task name (also the collision label)
    pub name: String,

    /// Resource class the task occupies
    pub kind: TaskKind,

    /// Resource label, used for reporting only
    pub resource: String,

    /// Duration in whole seconds
    pub duration_sec: u64,
}

impl Task {
    /// Creates a new task.
    pub fn new(name: &str, kind: TaskKind, resource: &str, duration_sec: u64) -> Self {
        Self {
            name: name.to_string(),
            kind,
            resource: resource.to_string(),
            duration_sec,
        }
    }

    /// Creates a shared-actuator (robot move) task.
    pub fn shared(name: &str, resource: &str, duration_sec: u64) -> Self {
        Self::new(name, TaskKind::SharedActuator, resource, duration_sec)
    }

    /// Creates a standalone instrument task.
    pub fn standalone(name: &str, resource: &str, duration_sec: u64) -> Self {
        Self::new(name, TaskKind::Standalone, resource, duration_sec)
    }
}

/// A task placed on one plate's time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedTask {
    pub task: Task,

    /// Start offset from the plate's launch (seconds)
    pub start_offset_sec: u64,

    /// End offset from the plate's launch (seconds)
    pub end_offset_sec: u64,
}

impl TimedTask {
    pub fn name(&self) -> &str {
        &self.task.name
    }

    pub fn kind(&self) -> TaskKind {
        self.task.kind
    }

    pub fn duration_sec(&self) -> u64 {
        self.end_offset_sec - self.start_offset_sec
    }
}
