//! Plain-language summary of a search result.

use crate::result::SimulationResult;
use crate::task::{Task, TaskKind};

/// Formats seconds as `"{h}h {m}m {s}s"`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{}h {}m {}s", hours, minutes, secs)
}

/// Formats seconds as hours with one decimal.
pub fn format_hours(seconds: i64) -> String {
    format!("{:.1}", seconds as f64 / 3600.0)
}

/// The longest instrument step, which bounds throughput once the arm is
/// no longer contended. Ties go to the earliest task.
pub fn bottleneck(tasks: &[Task]) -> Option<&Task> {
    tasks
        .iter()
        .filter(|t| t.kind == TaskKind::Standalone)
        .fold(None, |best: Option<&Task>, t| match best {
            Some(b) if b.duration_sec >= t.duration_sec => Some(b),
            _ => Some(t),
        })
}

/// One-paragraph summary for the lead scientist.
pub fn lead_scientist_summary(
    tasks: &[Task],
    plate_count: usize,
    result: &SimulationResult,
) -> String {
    let gain_sec = result.sequential_makespan_sec as i64 - result.pipelined_makespan_sec as i64;
    let gain_pct = if result.sequential_makespan_sec == 0 {
        0.0
    } else {
        gain_sec as f64 / result.sequential_makespan_sec as f64 * 100.0
    };

    let bottleneck_name = match bottleneck(tasks) {
        Some(t) if !t.resource.is_empty() => t.resource.as_str(),
        Some(t) if !t.name.is_empty() => t.name.as_str(),
        _ => "instrument",
    };

    format!(
        "By pipelining these {} plates with a {}-second stagger, \
         we reduced the total makespan by {} hours ({:.1}% gain). \
         The bottleneck remains the {} duration. \
         Next, we can explore whether the MOVE queue or {} capacity \
         offers the highest leverage for additional throughput.",
        plate_count,
        result.stagger_sec,
        format_hours(gain_sec),
        gain_pct,
        bottleneck_name,
        bottleneck_name,
    )
}
