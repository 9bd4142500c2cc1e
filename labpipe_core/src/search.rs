//! Stagger Search
//! ==============
//!
//! Scans candidate staggers `0, step, 2*step, ..` up to one full plate
//! duration and returns the first one at which no two plates hold the
//! robot arm at the same time.
//!
//! The scan is a first-fit grid search. Collision count is not monotonic
//! in stagger (a wider spacing can line a plate's late move up with the
//! next plate's early move), so the scan never bisects.
//!
//! When no candidate on the grid is collision-free the least-bad one is
//! returned: the first candidate with strictly fewer collisions than every
//! earlier one, so ties keep the smaller stagger.
//!
//! [`calculate_optimal_pipelining_parallel`] spreads the same candidates
//! over scoped worker threads and combines them by candidate index, so it
//! returns exactly what the sequential scan returns.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::channel;
use tracing::{debug, info};

use crate::collision::{detect_collisions, CollisionPoint};
use crate::config::SimulationConfig;
use crate::error::{ConfigError, SearchError};
use crate::intervals::expand_move_intervals;
use crate::result::SimulationResult;
use crate::task::{Task, TimedTask};
use crate::timeline::{build_timeline, checked_plate_duration, plate_duration};

/// Collisions at one candidate stagger.
pub fn evaluate_stagger(
    timeline: &[TimedTask],
    plate_count: usize,
    stagger_sec: u64,
) -> Vec<CollisionPoint> {
    let intervals = expand_move_intervals(timeline, plate_count, stagger_sec);
    detect_collisions(&intervals)
}

/// Candidate staggers `0, step, ..` not exceeding `plate_duration_sec`.
pub fn candidate_staggers(plate_duration_sec: u64, stagger_step_sec: u64) -> Vec<u64> {
    stagger_grid(plate_duration_sec, stagger_step_sec).collect()
}

fn stagger_grid(plate_duration_sec: u64, stagger_step_sec: u64) -> impl Iterator<Item = u64> {
    let step = usize::try_from(stagger_step_sec).unwrap_or(usize::MAX);
    (0..=plate_duration_sec).step_by(step.max(1))
}

/// Every offset the search computes is at most `plate_duration * plates`.
fn check_time_axis(plate_duration_sec: u64, plates: usize) -> Result<(), ConfigError> {
    match plate_duration_sec.checked_mul(plates as u64) {
        Some(_) => Ok(()),
        None => Err(ConfigError::TimeOverflow { plates }),
    }
}

fn checked_timeline(tasks: &[Task], plates: usize) -> Result<Vec<TimedTask>, ConfigError> {
    match checked_plate_duration(tasks) {
        Some(_) => Ok(build_timeline(tasks)),
        None => Err(ConfigError::TimeOverflow { plates }),
    }
}

/// Plate duration the search works with. A run without plates takes no time.
fn search_duration(timeline: &[TimedTask], config: &SimulationConfig) -> u64 {
    if config.plate_count == 0 {
        0
    } else {
        plate_duration(timeline)
    }
}

/// Finds the minimal collision-free stagger for `tasks`.
pub fn calculate_optimal_pipelining(
    tasks: &[Task],
    config: &SimulationConfig,
) -> Result<SimulationResult, ConfigError> {
    config.validate()?;
    search_timeline(&checked_timeline(tasks, config.plate_count)?, config)
}

/// Same as [`calculate_optimal_pipelining`] on an already built timeline.
pub fn search_timeline(
    timeline: &[TimedTask],
    config: &SimulationConfig,
) -> Result<SimulationResult, ConfigError> {
    config.validate()?;

    let plates = config.plate_count;
    let plate_duration_sec = search_duration(timeline, config);
    check_time_axis(plate_duration_sec, plates)?;

    // Spacing plates a full duration apart can never collide
    let mut best = SimulationResult::new(plate_duration_sec, plate_duration_sec, plates, Vec::new());

    for stagger in stagger_grid(plate_duration_sec, config.stagger_step_sec) {
        let collisions = evaluate_stagger(timeline, plates, stagger);
        debug!("stagger={}s collisions={}", stagger, collisions.len());

        if collisions.is_empty() {
            info!(
                "Collision-free stagger {}s for {} plates (plate duration {}s)",
                stagger, plates, plate_duration_sec
            );
            return Ok(SimulationResult::new(stagger, plate_duration_sec, plates, collisions));
        }

        if stagger == 0 || collisions.len() < best.collisions.len() {
            best = SimulationResult::new(stagger, plate_duration_sec, plates, collisions);
        }
    }

    info!(
        "No collision-free stagger on a {}s grid; best is {}s with {} collisions",
        config.stagger_step_sec,
        best.stagger_sec,
        best.collisions.len()
    );
    Ok(best)
}

/// Parallel variant of [`calculate_optimal_pipelining`].
///
/// Workers claim candidates in ascending order. Once a collision-free
/// candidate is known, larger candidates are skipped; every smaller one has
/// already been claimed and is still evaluated, so the smallest feasible
/// stagger always wins regardless of completion order.
pub fn calculate_optimal_pipelining_parallel(
    tasks: &[Task],
    config: &SimulationConfig,
    threads: usize,
) -> Result<SimulationResult, SearchError> {
    config.validate()?;
    if threads == 0 {
        return Err(ConfigError::InvalidThreadCount(threads).into());
    }

    let plates = config.plate_count;
    let timeline = checked_timeline(tasks, plates)?;
    let plate_duration_sec = search_duration(&timeline, config);
    check_time_axis(plate_duration_sec, plates)?;
    let candidates = candidate_staggers(plate_duration_sec, config.stagger_step_sec);

    let next = AtomicUsize::new(0);
    let first_feasible = AtomicUsize::new(usize::MAX);
    let (tx, rx) = channel::unbounded::<(usize, usize)>();

    crossbeam::scope(|scope| {
        for _ in 0..threads.min(candidates.len()) {
            let tx = tx.clone();
            let next = &next;
            let first_feasible = &first_feasible;
            let candidates = &candidates;
            let timeline = &timeline;

            scope.spawn(move |_| loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                if idx >= candidates.len() || idx > first_feasible.load(Ordering::Acquire) {
                    break;
                }

                let count = evaluate_stagger(timeline, plates, candidates[idx]).len();
                if count == 0 {
                    first_feasible.fetch_min(idx, Ordering::AcqRel);
                }
                if tx.send((idx, count)).is_err() {
                    break;
                }
            });
        }
    })
    .map_err(|_| SearchError::WorkerPanicked)?;
    drop(tx);

    let mut counts: Vec<Option<usize>> = vec![None; candidates.len()];
    for (idx, count) in rx.try_iter() {
        counts[idx] = Some(count);
    }
    debug!(
        "Evaluated {}/{} candidates on {} threads",
        counts.iter().filter(|c| c.is_some()).count(),
        candidates.len(),
        threads
    );

    let chosen = match counts.iter().position(|c| *c == Some(0)) {
        Some(idx) => idx,
        None => least_bad(&counts),
    };

    let stagger = candidates[chosen];
    let collisions = evaluate_stagger(&timeline, plates, stagger);
    info!(
        "Parallel search chose stagger {}s ({} collisions)",
        stagger,
        collisions.len()
    );
    Ok(SimulationResult::new(stagger, plate_duration_sec, plates, collisions))
}

/// Index of the first candidate with strictly fewer collisions than all
/// earlier ones. Only called when every candidate was evaluated.
fn least_bad(counts: &[Option<usize>]) -> usize {
    let mut best = 0;
    let mut best_count = usize::MAX;
    for (idx, count) in counts.iter().enumerate() {
        if let Some(count) = *count {
            if idx == 0 || count < best_count {
                best = idx;
                best_count = count;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The plate read workflow: 25/30/300/25/200/30 with moves at 1, 2, 4, 6.
    fn plate_read() -> Vec<Task> {
        vec![
            Task::shared("Pick Plate", "Staubli TX-60", 25),
            Task::shared("Load Incubator", "Staubli TX-60", 30),
            Task::standalone("Incubate A", "Incubator A", 300),
            Task::shared("Unload Incubator", "Staubli TX-60", 25),
            Task::standalone("Plate Read", "Reader 01", 200),
            Task::shared("Return Plate", "Staubli TX-60", 30),
        ]
    }

    #[test]
    fn test_plate_read_scenario() {
        let config = SimulationConfig::new(12).with_step(10);
        let result = calculate_optimal_pipelining(&plate_read(), &config).unwrap();

        assert_eq!(result.plate_duration_sec, 610);
        assert_eq!(result.sequential_makespan_sec, 610 * 12);
        assert!(result.is_collision_free());
        assert_eq!(result.stagger_sec, 130);
        assert_eq!(result.pipelined_makespan_sec, 610 + 130 * 11);

        // Nothing smaller on the grid is feasible
        let timeline = build_timeline(&plate_read());
        for stagger in (0..result.stagger_sec).step_by(10) {
            assert!(!evaluate_stagger(&timeline, 12, stagger).is_empty());
        }
    }

    #[test]
    fn test_single_plate() {
        let config = SimulationConfig::new(1).with_step(10);
        let result = calculate_optimal_pipelining(&plate_read(), &config).unwrap();

        assert_eq!(result.stagger_sec, 0);
        assert_eq!(result.sequential_makespan_sec, 610);
        assert_eq!(result.pipelined_makespan_sec, 610);
        assert!(result.is_collision_free());
    }

    #[test]
    fn test_zero_stagger_collides_at_time_zero() {
        let tasks = vec![
            Task::shared("Pick", "Arm", 20),
            Task::shared("Place", "Arm", 20),
        ];
        let timeline = build_timeline(&tasks);

        let collisions = evaluate_stagger(&timeline, 2, 0);

        assert!(!collisions.is_empty());
        assert_eq!(collisions[0].time_sec, 0);
    }

    #[test]
    fn test_no_moves_returns_zero_stagger() {
        let tasks = vec![
            Task::standalone("Incubate", "Incubator", 300),
            Task::standalone("Read", "Reader", 100),
        ];
        let config = SimulationConfig::new(50);

        let result = calculate_optimal_pipelining(&tasks, &config).unwrap();

        assert_eq!(result.stagger_sec, 0);
        assert!(result.collisions.is_empty());
        assert_eq!(result.pipelined_makespan_sec, 400);
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = calculate_optimal_pipelining(&[], &SimulationConfig::new(8)).unwrap();
        assert_eq!(empty, SimulationResult::new(0, 0, 8, vec![]));
        assert_eq!(empty.sequential_makespan_sec, 0);
        assert_eq!(empty.pipelined_makespan_sec, 0);

        let no_plates = calculate_optimal_pipelining(&plate_read(), &SimulationConfig::new(0)).unwrap();
        assert_eq!(no_plates.plate_duration_sec, 0);
        assert_eq!(no_plates.stagger_sec, 0);
        assert_eq!(no_plates.pipelined_makespan_sec, 0);
        assert!(no_plates.collisions.is_empty());
    }

    #[test]
    fn test_zero_step_fails_fast() {
        let config = SimulationConfig::new(4).with_step(0);
        assert_eq!(
            calculate_optimal_pipelining(&plate_read(), &config),
            Err(ConfigError::InvalidStaggerStep(0))
        );
        assert!(matches!(
            calculate_optimal_pipelining_parallel(&plate_read(), &config, 4),
            Err(SearchError::Config(ConfigError::InvalidStaggerStep(0)))
        ));
    }

    #[test]
    fn test_fallback_when_grid_misses() {
        // Duration 15 with step 10 tests 0 and 10 only; neither is clean
        let tasks = vec![
            Task::shared("Pick", "Arm", 5),
            Task::standalone("Shake", "Shaker", 5),
            Task::shared("Place", "Arm", 5),
        ];
        let config = SimulationConfig::new(2).with_step(10);

        let result = calculate_optimal_pipelining(&tasks, &config).unwrap();

        assert_eq!(result.stagger_sec, 10);
        assert_eq!(
            result.collisions,
            vec![CollisionPoint {
                time_sec: 10,
                plate_a: 0,
                plate_b: 1,
                task: "Pick".to_string(),
            }]
        );
        assert_eq!(result.pipelined_makespan_sec, 15 + 10);
    }

    #[test]
    fn test_fallback_tie_keeps_smaller_stagger() {
        // 0 and 10 both give 2 collisions among 3 plates of a 25s move
        let tasks = vec![Task::shared("Move", "Arm", 25)];
        let config = SimulationConfig::new(3).with_step(10);
        let timeline = build_timeline(&tasks);

        assert_eq!(evaluate_stagger(&timeline, 3, 0).len(), 2);
        assert_eq!(evaluate_stagger(&timeline, 3, 10).len(), 2);
        assert_eq!(evaluate_stagger(&timeline, 3, 20).len(), 2);

        let result = calculate_optimal_pipelining(&tasks, &config).unwrap();
        assert_eq!(result.stagger_sec, 0);
    }

    #[test]
    fn test_candidates_include_duration() {
        assert_eq!(candidate_staggers(30, 10), vec![0, 10, 20, 30]);
        assert_eq!(candidate_staggers(25, 10), vec![0, 10, 20]);
        assert_eq!(candidate_staggers(0, 10), vec![0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let workflows = vec![
            plate_read(),
            vec![Task::shared("Move", "Arm", 15)],
            vec![Task::shared("Move", "Arm", 25)],
            vec![
                Task::shared("Pick", "Arm", 5),
                Task::standalone("Shake", "Shaker", 5),
                Task::shared("Place", "Arm", 5),
            ],
            vec![Task::standalone("Read", "Reader", 40)],
            vec![],
        ];

        for tasks in &workflows {
            for plates in [0, 1, 2, 12] {
                let config = SimulationConfig::new(plates).with_step(10);
                let sequential = calculate_optimal_pipelining(tasks, &config).unwrap();
                for threads in [1, 3, 8] {
                    let parallel = calculate_optimal_pipelining_parallel(tasks, &config, threads).unwrap();
                    assert_eq!(parallel, sequential);
                }
            }
        }
    }

    #[test]
    fn test_parallel_rejects_zero_threads() {
        let config = SimulationConfig::new(2);
        assert!(matches!(
            calculate_optimal_pipelining_parallel(&plate_read(), &config, 0),
            Err(SearchError::Config(ConfigError::InvalidThreadCount(0)))
        ));
    }

    #[test]
    fn test_overflowing_workflow_is_rejected() {
        let half = u64::MAX / 2 + 1;
        let tasks = vec![
            Task::standalone("Incubate", "Incubator", half),
            Task::standalone("Read", "Reader", half),
        ];
        let config = SimulationConfig::new(1);
        assert_eq!(
            calculate_optimal_pipelining(&tasks, &config),
            Err(ConfigError::TimeOverflow { plates: 1 })
        );
        assert!(matches!(
            calculate_optimal_pipelining_parallel(&tasks, &config, 2),
            Err(SearchError::Config(ConfigError::TimeOverflow { .. }))
        ));

        // One plate fits; two plates of it do not
        let tasks = vec![Task::shared("Move", "Arm", u64::MAX)];
        let single = calculate_optimal_pipelining(&tasks, &SimulationConfig::new(1)).unwrap();
        assert_eq!(single.sequential_makespan_sec, u64::MAX);
        assert_eq!(
            calculate_optimal_pipelining(&tasks, &SimulationConfig::new(2)),
            Err(ConfigError::TimeOverflow { plates: 2 })
        );
    }

    #[test]
    fn test_loaded_workflow_too_long_for_the_time_axis() {
        let csv = "Task Name,Task Type,Resource Used,Start Time,End Time\n\
                   Incubate,Instrument,Incubator,0,1e19\n\
                   Read,Instrument,Reader,0,1e19\n";
        let parsed = crate::workflow::parse_workflow_csv(csv).unwrap();
        assert_eq!(parsed.tasks[0].duration_sec, 10_000_000_000_000_000_000);

        assert_eq!(
            calculate_optimal_pipelining(&parsed.tasks, &SimulationConfig::new(2)),
            Err(ConfigError::TimeOverflow { plates: 2 })
        );
    }

    #[test]
    fn test_long_plate_returns_early() {
        // A grid of 10^12 candidates; only the first two are ever built
        let tasks = vec![
            Task::shared("Pick", "Arm", 1),
            Task::standalone("Incubate", "Incubator", 1_000_000_000_000),
        ];
        let config = SimulationConfig::new(2).with_step(1);

        let result = calculate_optimal_pipelining(&tasks, &config).unwrap();

        assert_eq!(result.stagger_sec, 1);
        assert!(result.is_collision_free());
        assert_eq!(result.plate_duration_sec, 1_000_000_000_001);
    }
}
