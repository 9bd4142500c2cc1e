//! Simulation runner - loads a workflow and runs the stagger search.

use std::path::PathBuf;

use labpipe_core::{
    calculate_optimal_pipelining, calculate_optimal_pipelining_parallel, lead_scientist_summary,
    LabResources, SimulationConfig, Task,
};
use tracing::{debug, info, warn};

use crate::error::SimError;
use crate::exporter::RunReport;
use crate::samples::SampleWorkflow;
use crate::synthetic::SyntheticWorkflow;

/// Where a run's tasks come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowSource {
    /// One of the built-in samples
    Sample(SampleWorkflow),

    /// A CSV export on disk
    Csv(PathBuf),

    /// A seeded synthetic workflow
    Synthetic { seed: u64, task_count: usize },
}

/// Tasks ready to simulate.
#[derive(Debug, Clone)]
pub struct LoadedWorkflow {
    pub name: String,
    pub seed: Option<u64>,
    pub tasks: Vec<Task>,
    pub warnings: Vec<String>,
}

impl WorkflowSource {
    /// Loads the tasks.
    pub fn load(&self) -> Result<LoadedWorkflow, SimError> {
        match self {
            WorkflowSource::Sample(sample) => {
                let parsed = sample.load()?;
                Ok(LoadedWorkflow {
                    name: sample.name().to_string(),
                    seed: None,
                    tasks: parsed.tasks,
                    warnings: parsed.warnings,
                })
            }
            WorkflowSource::Csv(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
                let parsed = labpipe_core::parse_workflow_csv(&text)?;
                Ok(LoadedWorkflow {
                    name: path.display().to_string(),
                    seed: None,
                    tasks: parsed.tasks,
                    warnings: parsed.warnings,
                })
            }
            WorkflowSource::Synthetic { seed, task_count } => Ok(LoadedWorkflow {
                name: "synthetic".to_string(),
                seed: Some(*seed),
                tasks: SyntheticWorkflow::new(*seed).generate(*task_count),
                warnings: Vec::new(),
            }),
        }
    }
}

/// Runs stagger searches against a lab configuration.
pub struct SimulationRunner {
    /// Robot arm and stackers
    resources: LabResources,

    /// Search grid step (seconds)
    stagger_step_sec: u64,

    /// Explicit plate count, overriding the stacker-derived one
    plates: Option<usize>,

    /// Worker threads (1 = sequential scan, 0 is rejected at run time)
    threads: usize,
}

impl Default for SimulationRunner {
    fn default() -> Self {
        Self::new(LabResources::default())
    }
}

impl SimulationRunner {
    /// Creates a runner for the given lab.
    pub fn new(resources: LabResources) -> Self {
        Self {
            resources,
            stagger_step_sec: SimulationConfig::default().stagger_step_sec,
            plates: None,
            threads: 1,
        }
    }

    /// Sets the search step.
    pub fn with_step(mut self, stagger_step_sec: u64) -> Self {
        self.stagger_step_sec = stagger_step_sec;
        self
    }

    /// Overrides the plate count.
    pub fn with_plates(mut self, plates: usize) -> Self {
        self.plates = Some(plates);
        self
    }

    /// Sets the number of search threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// The search configuration this runner will use.
    pub fn config(&self) -> SimulationConfig {
        let config = self.resources.simulation_config(self.stagger_step_sec);
        match self.plates {
            Some(plates) => config.with_plates(plates),
            None => config,
        }
    }

    /// Loads `source` and runs the search on it.
    pub fn run(&self, source: &WorkflowSource) -> Result<RunReport, SimError> {
        let workflow = source.load()?;
        for warning in &workflow.warnings {
            warn!("{}", warning);
        }
        self.run_workflow(workflow)
    }

    /// Runs the search on already loaded tasks.
    pub fn run_workflow(&self, workflow: LoadedWorkflow) -> Result<RunReport, SimError> {
        self.resources.ensure_robot_online()?;

        let config = self.config();
        info!(
            "Simulating '{}': {} tasks, {} plates, {}s step",
            workflow.name,
            workflow.tasks.len(),
            config.plate_count,
            config.stagger_step_sec
        );

        let result = if self.threads != 1 {
            debug!("Parallel search on {} threads", self.threads);
            calculate_optimal_pipelining_parallel(&workflow.tasks, &config, self.threads)?
        } else {
            calculate_optimal_pipelining(&workflow.tasks, &config)?
        };

        if !result.is_collision_free() {
            warn!(
                "No collision-free stagger found; best {}s still has {} collisions",
                result.stagger_sec,
                result.collisions.len()
            );
        }

        let summary = lead_scientist_summary(&workflow.tasks, config.plate_count, &result);

        let mut report = RunReport::new(&workflow.name, result, summary);
        report.seed = workflow.seed;
        report.task_count = workflow.tasks.len();
        report.plate_count = config.plate_count;
        report.stagger_step_sec = config.stagger_step_sec;
        report.threads = self.threads;
        report.warnings = workflow.warnings;
        Ok(report)
    }
}
