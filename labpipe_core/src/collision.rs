//! Collision Detector - single-pass overlap sweep over actuator windows.

use serde::{Deserialize, Serialize};

use crate::intervals::Interval;

/// Two plates holding the shared actuator at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPoint {
    /// Time the later interval starts while the active one still runs
    pub time_sec: u64,

    /// Plate holding the active (extending) interval
    pub plate_a: usize,

    /// Plate whose interval started inside it
    pub plate_b: usize,

    /// Task of the later interval
    pub task: String,
}

/// Sweeps start-sorted intervals and reports each overlap.
///
/// Every interval is compared only against the active one, the interval
/// with the latest end seen so far. Input must be sorted by `start_sec`
/// (see [`crate::intervals::expand_move_intervals`]). Intervals that merely
/// touch (`start == active.end`) do not collide.
pub fn detect_collisions(intervals: &[Interval]) -> Vec<CollisionPoint> {
    let mut collisions = Vec::new();

    let Some((first, rest)) = intervals.split_first() else {
        return collisions;
    };

    let mut active = first;
    for current in rest {
        if current.start_sec < active.end_sec {
            collisions.push(CollisionPoint {
                time_sec: current.start_sec,
                plate_a: active.plate,
                plate_b: current.plate,
                task: current.task.clone(),
            });
            if current.end_sec > active.end_sec {
                active = current;
            }
        } else {
            active = current;
        }
    }

    collisions
}
