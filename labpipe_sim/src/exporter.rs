//! JSON export of a simulation run.
//!
//! The report carries the raw [`SimulationResult`] plus the derived figures
//! and summary text a dashboard would show next to it.

use labpipe_core::{format_duration, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SimError;

/// Complete record of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Workflow name (sample name, file path or `synthetic`)
    pub workflow: String,

    /// Seed used for synthetic workflows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Tasks per plate
    pub task_count: usize,

    /// Plates pipelined
    pub plate_count: usize,

    /// Search grid step (seconds)
    pub stagger_step_sec: u64,

    /// Worker threads used by the search
    pub threads: usize,

    /// Loader warnings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Search outcome
    pub result: SimulationResult,

    /// Seconds saved by pipelining
    pub gain_sec: u64,

    /// Gain as a percentage of the sequential makespan
    pub gain_percent: f64,

    /// Sequential makespan, human readable
    pub sequential_display: String,

    /// Pipelined makespan, human readable
    pub pipelined_display: String,

    /// Lead scientist summary
    pub summary: String,
}

impl RunReport {
    /// Fills in the derived fields from `result`.
    pub fn new(workflow: &str, result: SimulationResult, summary: String) -> Self {
        Self {
            workflow: workflow.to_string(),
            seed: None,
            task_count: 0,
            plate_count: 0,
            stagger_step_sec: 0,
            threads: 1,
            warnings: Vec::new(),
            gain_sec: result.gain_sec(),
            gain_percent: result.gain_percent(),
            sequential_display: format_duration(result.sequential_makespan_sec),
            pipelined_display: format_duration(result.pipelined_makespan_sec),
            result,
            summary,
        }
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let mut file = File::create(path).map_err(|e| SimError::io(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| SimError::io(path, e))?;
        Ok(())
    }

    /// Key=value lines for terminal output.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("workflow={}", self.workflow),
            format!("plates={}", self.plate_count),
            format!("plate_duration_sec={}", self.result.plate_duration_sec),
            format!("stagger_sec={}", self.result.stagger_sec),
            format!("collision_free={}", self.result.is_collision_free()),
            format!("collisions={}", self.result.collisions.len()),
            format!("sequential={}", self.sequential_display),
            format!("pipelined={}", self.pipelined_display),
            format!("gain_percent={:.1}", self.gain_percent),
        ]
    }
}
