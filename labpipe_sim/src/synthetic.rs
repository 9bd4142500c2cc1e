//! Seeded synthetic workflows for stress runs.
//!
//! All randomness comes from one `u64` seed, so a workflow that trips a
//! bug can be reproduced from its seed alone.

use labpipe_core::Task;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Robot move duration range (seconds)
const MOVE_SECS: std::ops::RangeInclusive<u64> = 10..=60;

/// Instrument step duration range (seconds)
const INSTRUMENT_SECS: std::ops::RangeInclusive<u64> = 30..=600;

/// Chance that the next task after a move is another move
const BACK_TO_BACK_MOVE_P: f64 = 0.25;

/// Generates workflows from a seed.
pub struct SyntheticWorkflow {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SyntheticWorkflow {
    /// Creates a generator for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates `task_count` tasks.
    ///
    /// Workflows start with a robot pick. Instruments are always followed by
    /// a move; a move is usually followed by an instrument.
    pub fn generate(&mut self, task_count: usize) -> Vec<Task> {
        let mut tasks = Vec::with_capacity(task_count);
        let mut last_was_move = false;

        for i in 0..task_count {
            let is_move = i == 0 || !last_was_move || self.rng.gen_bool(BACK_TO_BACK_MOVE_P);

            let task = if is_move {
                let secs = self.rng.gen_range(MOVE_SECS);
                Task::shared(&format!("Move {}", i + 1), "Robot Arm", secs)
            } else {
                let secs = self.rng.gen_range(INSTRUMENT_SECS);
                let station = self.rng.gen_range(1..=4);
                Task::standalone(
                    &format!("Step {}", i + 1),
                    &format!("Station {:02}", station),
                    secs,
                )
            };

            last_was_move = is_move;
            tasks.push(task);
        }

        tasks
    }
}
