//! Error types for the simulation harness.

use std::path::PathBuf;

use labpipe_core::{ConfigError, SearchError, WorkflowError};
use thiserror::Error;

/// Errors that can occur while loading a workflow or running a search.
#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected configuration (zero step, robot offline, ...)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The parallel search failed
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The workflow CSV could not be parsed
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Reading a workflow or writing an export failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for caller mistakes (bad flags or settings) rather than failures.
    pub fn is_config(&self) -> bool {
        matches!(self, SimError::Config(_) | SimError::Search(SearchError::Config(_)))
    }
}
