//! Move-Interval Expander.
//!
//! Replicates the shared-actuator windows of one plate's timeline across
//! every plate in the run, each plate shifted by `plate * stagger`.

use serde::{Deserialize, Serialize};

use crate::task::TimedTask;

/// A window during which one plate holds the shared actuator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Absolute start time (seconds from the first plate's launch)
    pub start_sec: u64,

    /// Absolute end time (seconds)
    pub end_sec: u64,

    /// Plate index in `0..plate_count`
    pub plate: usize,

    /// Name of the task holding the actuator
    pub task: String,
}

/// Expands the actuator windows for `plate_count` plates launched every
/// `stagger_sec` seconds.
///
/// The result is sorted by start time. The sort is stable, so ties keep
/// plate order and, within a plate, task order. The collision sweep
/// depends on this ordering.
pub fn expand_move_intervals(
    timeline: &[TimedTask],
    plate_count: usize,
    stagger_sec: u64,
) -> Vec<Interval> {
    let move_tasks: Vec<&TimedTask> = timeline
        .iter()
        .filter(|t| t.kind().is_shared_actuator())
        .collect();

    let mut intervals = Vec::with_capacity(move_tasks.len() * plate_count);

    for plate in 0..plate_count {
        let offset = plate as u64 * stagger_sec;
        for task in &move_tasks {
            intervals.push(Interval {
                start_sec: offset + task.start_offset_sec,
                end_sec: offset + task.end_offset_sec,
                plate,
                task: task.name().to_string(),
            });
        }
    }

    intervals.sort_by_key(|i| i.start_sec);
    intervals
}
