//! Built-in sample workflows.

use labpipe_core::{parse_workflow_csv, ParsedWorkflow, WorkflowError};

/// Sample workflow identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWorkflow {
    /// Pick, incubate, read, return: four robot moves around two instruments
    PlateRead,

    /// Instruments only, nothing contends for the arm
    NoRobot,

    /// One long robot move bracketed by short instrument steps
    SingleMove,
}

const PLATE_READ_CSV: &str = "Task Name,Task Type,Resource Used,Start Time,End Time
Pick Plate,MOVE Function,Staubli TX-60,00:00:00,00:00:25
Load Incubator,MOVE Function,Staubli TX-60,00:00:25,00:00:55
Incubate A,Instrument Function,Incubator A,00:00:55,00:05:55
Unload Incubator,MOVE Function,Staubli TX-60,00:05:55,00:06:20
Plate Read,Instrument Function,Reader 01,00:06:20,00:09:40
Return Plate,MOVE Function,Staubli TX-60,00:09:40,00:10:10";

const NO_ROBOT_CSV: &str = "Task Name,Task Type,Resource Used,Start Time,End Time
Dispense,Instrument Function,Dispenser 02,00:00:00,00:01:30
Incubate B,Instrument Function,Incubator B,00:01:30,00:21:30
Plate Read,Instrument Function,Reader 01,00:21:30,00:24:50";

const SINGLE_MOVE_CSV: &str = "Task Name,Task Type,Resource Used,Start Time,End Time
Barcode Scan,Instrument Function,Scanner 01,00:00:00,00:00:15
Transfer to Hotel,MOVE Function,Staubli TX-60,00:00:15,00:01:45
Seal,Instrument Function,Sealer 01,00:01:45,00:02:30";

impl SampleWorkflow {
    /// Returns a list of all samples.
    pub fn all() -> Vec<SampleWorkflow> {
        vec![
            SampleWorkflow::PlateRead,
            SampleWorkflow::NoRobot,
            SampleWorkflow::SingleMove,
        ]
    }

    /// Returns the sample name.
    pub fn name(&self) -> &'static str {
        match self {
            SampleWorkflow::PlateRead => "plate_read",
            SampleWorkflow::NoRobot => "no_robot",
            SampleWorkflow::SingleMove => "single_move",
        }
    }

    /// Returns a description of the sample.
    pub fn description(&self) -> &'static str {
        match self {
            SampleWorkflow::PlateRead => "6 tasks, 610s per plate, 4 robot moves",
            SampleWorkflow::NoRobot => "3 instrument tasks, no arm contention",
            SampleWorkflow::SingleMove => "3 tasks, one 90s robot transfer",
        }
    }

    /// Returns the CSV export of the sample.
    pub fn csv(&self) -> &'static str {
        match self {
            SampleWorkflow::PlateRead => PLATE_READ_CSV,
            SampleWorkflow::NoRobot => NO_ROBOT_CSV,
            SampleWorkflow::SingleMove => SINGLE_MOVE_CSV,
        }
    }

    /// Parses the sample through the regular CSV loader.
    pub fn load(&self) -> Result<ParsedWorkflow, WorkflowError> {
        parse_workflow_csv(self.csv())
    }
}

impl std::fmt::Display for SampleWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SampleWorkflow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plate_read" | "plateread" | "default" => Ok(SampleWorkflow::PlateRead),
            "no_robot" | "norobot" => Ok(SampleWorkflow::NoRobot),
            "single_move" | "singlemove" => Ok(SampleWorkflow::SingleMove),
            _ => Err(format!("Unknown sample workflow: {}", s)),
        }
    }
}
