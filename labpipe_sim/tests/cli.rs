//! CLI integration tests for the simulator binary.

use std::process::Command;

fn labpipe_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_labpipe-sim"))
}

#[test]
fn plate_read_reports_collision_free_stagger() {
    let output = labpipe_sim()
        .args(["--plates", "12"])
        .output()
        .expect("failed to run simulator binary");

    assert!(
        output.status.success(),
        "simulator exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = |key: &str| {
        stdout
            .lines()
            .find(|l| l.starts_with(key))
            .unwrap_or_else(|| panic!("{} line missing", key))
            .trim()
            .to_string()
    };

    assert_eq!(line("plate_duration_sec="), "plate_duration_sec=610");
    assert_eq!(line("stagger_sec="), "stagger_sec=130");
    assert_eq!(line("collision_free="), "collision_free=true");
    assert!(stdout.contains("By pipelining these 12 plates with a 130-second stagger"));
}

#[test]
fn json_output_matches_parallel_search() {
    let output = labpipe_sim()
        .args(["--plates", "12", "--threads", "4", "--json"])
        .output()
        .expect("failed to run simulator binary");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");

    assert_eq!(report["workflow"], "plate_read");
    assert_eq!(report["threads"], 4);
    assert_eq!(report["result"]["staggerSec"], 130);
    assert_eq!(report["result"]["pipelinedMakespanSec"], 610 + 130 * 11);
    assert!(report["result"]["collisions"].as_array().unwrap().is_empty());
}

#[test]
fn csv_workflow_from_disk() {
    let path = std::env::temp_dir().join(format!("labpipe_cli_{}.csv", std::process::id()));
    std::fs::write(
        &path,
        "Task Name,Task Type,Resource Used,Start Time,End Time\n\
         Pick,MOVE Function,Arm,0,20\n\
         Read,Instrument Function,Reader,20,100\n",
    )
    .unwrap();

    let output = labpipe_sim()
        .arg("--workflow")
        .arg(&path)
        .args(["--plates", "3", "--json"])
        .output()
        .expect("failed to run simulator binary");
    std::fs::remove_file(&path).ok();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["result"]["staggerSec"], 20);
    assert_eq!(report["result"]["plateDurationSec"], 100);
}

#[test]
fn zero_step_is_rejected() {
    let output = labpipe_sim()
        .args(["--step", "0"])
        .output()
        .expect("failed to run simulator binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stagger_step_sec"));
}

#[test]
fn zero_threads_is_rejected() {
    let output = labpipe_sim()
        .args(["--threads", "0"])
        .output()
        .expect("failed to run simulator binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("threads must be positive"));
}

#[test]
fn oversized_csv_durations_are_rejected() {
    let path = std::env::temp_dir().join(format!("labpipe_cli_long_{}.csv", std::process::id()));
    std::fs::write(
        &path,
        "Task Name,Task Type,Resource Used,Start Time,End Time\n\
         Incubate,Instrument Function,Incubator,0,1e19\n\
         Read,Instrument Function,Reader,0,1e19\n",
    )
    .unwrap();

    let output = labpipe_sim()
        .arg("--workflow")
        .arg(&path)
        .args(["--plates", "2"])
        .output()
        .expect("failed to run simulator binary");
    std::fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("overflow the time axis"));
}

#[test]
fn robot_offline_is_rejected() {
    let output = labpipe_sim()
        .arg("--robot-offline")
        .output()
        .expect("failed to run simulator binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("offline"));
}

#[test]
fn unknown_sample_is_rejected() {
    let output = labpipe_sim()
        .args(["--sample", "nope"])
        .output()
        .expect("failed to run simulator binary");

    assert!(!output.status.success());
}
