//! Search configuration and the lab resources it is derived from.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stackers installed in the reference cell.
pub const STACKER_COUNT: usize = 12;

/// Plates held by one stacker.
pub const PLATES_PER_STACKER: usize = 13;

/// Default resolution of the stagger grid (seconds).
pub const DEFAULT_STAGGER_STEP_SEC: u64 = 10;

/// Parameters of one stagger search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Plates pipelined through the workflow
    pub plate_count: usize,

    /// Spacing of candidate staggers (seconds, must be positive)
    pub stagger_step_sec: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            plate_count: STACKER_COUNT * PLATES_PER_STACKER,
            stagger_step_sec: DEFAULT_STAGGER_STEP_SEC,
        }
    }
}

impl SimulationConfig {
    /// Creates a config for `plate_count` plates at the default step.
    pub fn new(plate_count: usize) -> Self {
        Self {
            plate_count,
            ..Default::default()
        }
    }

    /// Sets the plate count.
    pub fn with_plates(mut self, plate_count: usize) -> Self {
        self.plate_count = plate_count;
        self
    }

    /// Sets the stagger step.
    pub fn with_step(mut self, stagger_step_sec: u64) -> Self {
        self.stagger_step_sec = stagger_step_sec;
        self
    }

    /// Rejects configurations the search cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stagger_step_sec == 0 {
            return Err(ConfigError::InvalidStaggerStep(self.stagger_step_sec));
        }
        Ok(())
    }
}

/// Robot arm on/off switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotArm {
    pub name: String,
    pub active: bool,
}

/// The lab's resource settings. The plate count of a run comes from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabResources {
    /// The shared actuator
    pub robot: RobotArm,

    /// Which stackers are in service
    pub stackers: Vec<bool>,

    /// Plates loaded per active stacker
    pub plates_per_stacker: usize,
}

impl Default for LabResources {
    fn default() -> Self {
        Self {
            robot: RobotArm {
                name: "Staubli TX-60".to_string(),
                active: true,
            },
            stackers: vec![true; STACKER_COUNT],
            plates_per_stacker: PLATES_PER_STACKER,
        }
    }
}

impl LabResources {
    /// Keeps the first `active` stackers in service and the rest in maintenance.
    pub fn with_active_stackers(mut self, active: usize) -> Self {
        for (i, stacker) in self.stackers.iter_mut().enumerate() {
            *stacker = i < active;
        }
        self
    }

    /// Sets plates per stacker.
    pub fn with_plates_per_stacker(mut self, plates: usize) -> Self {
        self.plates_per_stacker = plates;
        self
    }

    /// Switches the robot arm on or off.
    pub fn with_robot_active(mut self, active: bool) -> Self {
        self.robot.active = active;
        self
    }

    /// Number of stackers in service.
    pub fn active_stackers(&self) -> usize {
        self.stackers.iter().filter(|s| **s).count()
    }

    /// Plates available from the active stackers.
    pub fn active_plate_count(&self) -> usize {
        self.active_stackers() * self.plates_per_stacker
    }

    /// Errors if the robot arm is offline.
    pub fn ensure_robot_online(&self) -> Result<(), ConfigError> {
        if self.robot.active {
            Ok(())
        } else {
            Err(ConfigError::RobotOffline(self.robot.name.clone()))
        }
    }

    /// Builds a search config from the active plates.
    ///
    /// With every stacker in maintenance the full installed capacity is used.
    pub fn simulation_config(&self, stagger_step_sec: u64) -> SimulationConfig {
        let plates = match self.active_plate_count() {
            0 => self.stackers.len() * self.plates_per_stacker,
            n => n,
        };
        SimulationConfig {
            plate_count: plates,
            stagger_step_sec,
        }
    }
}
