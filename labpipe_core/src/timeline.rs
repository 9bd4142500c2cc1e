//! Time Window Builder - lays one plate's tasks out back-to-back.

use crate::task::{Task, TimedTask};

/// Places every task on the plate's time axis, starting at 0 with no gaps.
///
/// Offsets saturate at `u64::MAX`; [`checked_plate_duration`] tells whether
/// the tasks fit at all.
pub fn build_timeline(tasks: &[Task]) -> Vec<TimedTask> {
    let mut cursor = 0u64;

    tasks
        .iter()
        .map(|task| {
            let start = cursor;
            let end = start.saturating_add(task.duration_sec);
            cursor = end;

            TimedTask {
                task: task.clone(),
                start_offset_sec: start,
                end_offset_sec: end,
            }
        })
        .collect()
}

/// Returns the time one plate takes end to end (0 for an empty timeline).
pub fn plate_duration(timeline: &[TimedTask]) -> u64 {
    timeline.last().map(|t| t.end_offset_sec).unwrap_or(0)
}

/// Sum of all task durations, or `None` when it overflows `u64`.
pub fn checked_plate_duration(tasks: &[Task]) -> Option<u64> {
    tasks
        .iter()
        .try_fold(0u64, |total, task| total.checked_add(task.duration_sec))
}
