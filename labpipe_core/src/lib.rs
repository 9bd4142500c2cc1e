//! LabPipe Core - Plate Pipelining Engine
//!
//! Finds how densely successive plates of a lab workflow can be launched
//! when every plate shares a single robot arm.
//!
//! # Pipeline
//!
//! ```text
//! tasks ──► timeline ──► move intervals (per stagger) ──► collision sweep
//!                               ▲                               │
//!                               └──────── stagger search ◄──────┘
//! ```
//!
//! 1. [`timeline`] lays one plate's tasks out back-to-back.
//! 2. [`intervals`] replicates the robot-arm windows across all plates.
//! 3. [`collision`] sweeps the windows for overlaps.
//! 4. [`search`] scans staggers `0, step, ..` for the first clean one.
//!
//! Everything is a pure function of `(tasks, config)`; [`workflow`] and
//! [`summary`] sit on either side for CSV input and text output.
//!
//! # Usage
//!
//! ```ignore
//! use labpipe_core::{calculate_optimal_pipelining, parse_workflow_csv, SimulationConfig};
//!
//! let workflow = parse_workflow_csv(&csv_text)?;
//! let config = SimulationConfig::new(156).with_step(10);
//! let result = calculate_optimal_pipelining(&workflow.tasks, &config)?;
//! println!("stagger = {}s", result.stagger_sec);
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod intervals;
pub mod result;
pub mod search;
pub mod summary;
pub mod task;
pub mod timeline;
pub mod workflow;

// Re-export key types for convenience
pub use collision::{detect_collisions, CollisionPoint};
pub use config::{LabResources, RobotArm, SimulationConfig};
pub use error::{ConfigError, SearchError, WorkflowError};
pub use intervals::{expand_move_intervals, Interval};
pub use result::SimulationResult;
pub use search::{
    calculate_optimal_pipelining, calculate_optimal_pipelining_parallel, evaluate_stagger,
    search_timeline,
};
pub use summary::{format_duration, lead_scientist_summary};
pub use task::{Task, TaskKind, TimedTask};
pub use timeline::{build_timeline, checked_plate_duration, plate_duration};
pub use workflow::{parse_workflow_csv, ParsedWorkflow};
