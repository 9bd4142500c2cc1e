//! LabPipe Simulation Harness
//!
//! Drives the [`labpipe_core`] engine from workflow sources (built-in
//! samples, CSV exports, seeded synthetic workflows) and packages the
//! outcome as a JSON-exportable [`RunReport`].
//!
//! # Usage
//!
//! ```ignore
//! use labpipe_sim::{SimulationRunner, WorkflowSource, SampleWorkflow};
//!
//! let report = SimulationRunner::default()
//!     .with_plates(12)
//!     .run(&WorkflowSource::Sample(SampleWorkflow::PlateRead))?;
//! report.write_to_file("plate_read.json")?;
//! ```

mod error;
mod exporter;
mod runner;
pub mod samples;
pub mod synthetic;

pub use error::SimError;
pub use exporter::RunReport;
pub use runner::{LoadedWorkflow, SimulationRunner, WorkflowSource};
pub use samples::SampleWorkflow;
pub use synthetic::SyntheticWorkflow;
