//! Result Model - the record handed to summarizers and renderers.

use serde::{Deserialize, Serialize};

use crate::collision::CollisionPoint;

/// Outcome of one stagger search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Chosen launch offset between consecutive plates (seconds)
    pub stagger_sec: u64,

    /// One plate's end-to-end duration (seconds)
    pub plate_duration_sec: u64,

    /// Makespan running plates one after another
    pub sequential_makespan_sec: u64,

    /// Makespan running plates at `stagger_sec`
    pub pipelined_makespan_sec: u64,

    /// Collisions at the chosen stagger, in sweep order (empty when feasible)
    pub collisions: Vec<CollisionPoint>,
}

impl SimulationResult {
    /// Builds a result, deriving the makespans from the plate duration.
    ///
    /// Makespans saturate at `u64::MAX`; the search rejects runs that would.
    pub fn new(
        stagger_sec: u64,
        plate_duration_sec: u64,
        plate_count: usize,
        collisions: Vec<CollisionPoint>,
    ) -> Self {
        Self {
            stagger_sec,
            plate_duration_sec,
            sequential_makespan_sec: plate_duration_sec.saturating_mul(plate_count as u64),
            pipelined_makespan_sec: pipelined_makespan(plate_duration_sec, stagger_sec, plate_count),
            collisions,
        }
    }

    /// Returns true if no two plates ever hold the actuator at once.
    pub fn is_collision_free(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Seconds saved by pipelining (0 if pipelining is not faster).
    pub fn gain_sec(&self) -> u64 {
        self.sequential_makespan_sec
            .saturating_sub(self.pipelined_makespan_sec)
    }

    /// Gain as a percentage of the sequential makespan.
    pub fn gain_percent(&self) -> f64 {
        if self.sequential_makespan_sec == 0 {
            return 0.0;
        }
        self.gain_sec() as f64 / self.sequential_makespan_sec as f64 * 100.0
    }
}

/// `plate_duration + stagger * (plates - 1)`, or 0 when there are no plates.
pub fn pipelined_makespan(plate_duration_sec: u64, stagger_sec: u64, plate_count: usize) -> u64 {
    if plate_count == 0 {
        return 0;
    }
    stagger_sec
        .saturating_mul(plate_count as u64 - 1)
        .saturating_add(plate_duration_sec)
}
