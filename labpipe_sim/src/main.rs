//! LabPipe Simulator CLI
//!
//! Find the tightest plate stagger for a workflow on a shared robot arm.

use clap::Parser;
use labpipe_core::LabResources;
use labpipe_sim::{SampleWorkflow, SimError, SimulationRunner, WorkflowSource};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// LabPipe plate pipelining simulator
#[derive(Parser, Debug)]
#[command(name = "labpipe-sim")]
#[command(about = "Search the minimum collision-free plate stagger for a lab workflow", long_about = None)]
struct Args {
    /// Workflow CSV (Task Name, Task Type, Resource Used, Start Time, End Time)
    #[arg(short, long)]
    workflow: Option<PathBuf>,

    /// Built-in sample workflow (plate_read, no_robot, single_move)
    #[arg(short, long, default_value = "plate_read")]
    sample: String,

    /// Generate a synthetic workflow with this many tasks
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for synthetic workflows
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Plate count (defaults to active stackers x plates per stacker)
    #[arg(short, long)]
    plates: Option<usize>,

    /// Stackers in service (out of 12)
    #[arg(long)]
    active_stackers: Option<usize>,

    /// Plates loaded per stacker
    #[arg(long, default_value = "13")]
    plates_per_stacker: usize,

    /// Stagger search step in seconds
    #[arg(long, default_value = "10")]
    step: u64,

    /// Search worker threads (1 = sequential)
    #[arg(short, long, default_value = "1")]
    threads: usize,

    /// Simulate with the robot arm switched off
    #[arg(long)]
    robot_offline: bool,

    /// List the built-in samples and exit
    #[arg(long)]
    list_samples: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long)]
    json: bool,

    /// Write the full report to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn init_logging(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else if args.json {
        Level::WARN
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn workflow_source(args: &Args) -> Result<WorkflowSource, String> {
    if let Some(path) = &args.workflow {
        return Ok(WorkflowSource::Csv(path.clone()));
    }
    if let Some(task_count) = args.synthetic {
        return Ok(WorkflowSource::Synthetic {
            seed: args.seed,
            task_count,
        });
    }
    args.sample.parse().map(WorkflowSource::Sample)
}

fn run(args: &Args, source: &WorkflowSource) -> Result<(), SimError> {
    let mut resources = LabResources::default()
        .with_plates_per_stacker(args.plates_per_stacker)
        .with_robot_active(!args.robot_offline);
    if let Some(active) = args.active_stackers {
        resources = resources.with_active_stackers(active);
    }

    let mut runner = SimulationRunner::new(resources)
        .with_step(args.step)
        .with_threads(args.threads);
    if let Some(plates) = args.plates {
        runner = runner.with_plates(plates);
    }

    let report = runner.run(source)?;

    if let Some(path) = &args.export {
        report.write_to_file(path)?;
        info!("Exported report to {}", path.display());
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        for line in report.summary_lines() {
            println!("{}", line);
        }
        println!();
        println!("{}", report.summary);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if args.list_samples {
        for sample in SampleWorkflow::all() {
            println!("{:<12} {}", sample.name(), sample.description());
        }
        return;
    }

    if !args.json {
        info!("LabPipe Simulator v{}", env!("CARGO_PKG_VERSION"));
    }

    let source = workflow_source(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available samples: plate_read, no_robot, single_move");
        std::process::exit(2);
    });

    if let Err(e) = run(&args, &source) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(if e.is_config() { 2 } else { 1 });
    }
}
