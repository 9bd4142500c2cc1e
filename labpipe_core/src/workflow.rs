//! Workflow loader - turns a CSV export into an ordered task list.
//!
//! Expected columns (extra columns are ignored):
//!
//! ```text
//! Task Name,Task Type,Resource Used,Start Time,End Time
//! Pick Plate,MOVE Function,Staubli TX-60,00:00:00,00:00:25
//! ```
//!
//! Durations come from `End Time - Start Time`. Any task type mentioning
//! "move" runs on the shared robot arm; everything else is an instrument.

use std::collections::HashMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::task::{Task, TaskKind};

pub const COL_NAME: &str = "Task Name";
pub const COL_TYPE: &str = "Task Type";
pub const COL_RESOURCE: &str = "Resource Used";
pub const COL_START: &str = "Start Time";
pub const COL_END: &str = "End Time";

/// Columns every workflow CSV must carry, in report order.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_NAME, COL_TYPE, COL_RESOURCE, COL_START, COL_END];

/// Tasks parsed from a CSV plus any non-fatal issues found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedWorkflow {
    pub tasks: Vec<Task>,
    pub warnings: Vec<String>,
}

/// Parses a workflow CSV.
pub fn parse_workflow_csv(csv_text: &str) -> Result<ParsedWorkflow, WorkflowError> {
    if csv_text.trim().is_empty() {
        return Err(WorkflowError::EmptyPayload);
    }

    let rows = parse_csv_records(csv_text)?;
    let mut parsed = ParsedWorkflow::default();

    for (index, row) in rows.iter().enumerate() {
        let start = parse_time_to_seconds(&row[COL_START])?;
        let end = parse_time_to_seconds(&row[COL_END])?;

        let mut duration = end - start;
        if duration < 0.0 {
            // Header is line 1
            let message = format!(
                "Row {} has an end time earlier than start time; duration was clamped.",
                index + 2
            );
            warn!("{}", message);
            parsed.warnings.push(message);
            duration = duration.abs();
        }

        let duration = duration.round();
        if duration >= u64::MAX as f64 {
            return Err(WorkflowError::DurationOutOfRange(index + 2));
        }

        let name = match row[COL_NAME].as_str() {
            "" => format!("Task {}", index + 1),
            name => name.to_string(),
        };
        let resource = match row[COL_RESOURCE].as_str() {
            "" => "Unknown",
            resource => resource,
        };

        parsed.tasks.push(Task::new(
            &name,
            normalize_task_type(&row[COL_TYPE]),
            resource,
            duration as u64,
        ));
    }

    debug!(
        "Parsed {} tasks ({} warnings)",
        parsed.tasks.len(),
        parsed.warnings.len()
    );
    Ok(parsed)
}

/// Any type mentioning "move" occupies the robot arm.
pub fn normalize_task_type(raw: &str) -> TaskKind {
    if raw.trim().to_lowercase().contains("move") {
        TaskKind::SharedActuator
    } else {
        TaskKind::Standalone
    }
}

/// Parses a time cell into seconds.
///
/// Accepts RFC 3339 timestamps (Unix seconds), `H:MM` / `HH:MM:SS` clock
/// offsets and plain numbers. An empty cell is 0.
pub fn parse_time_to_seconds(value: &str) -> Result<f64, WorkflowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.timestamp() as f64);
    }

    if let Some(secs) = parse_clock(trimmed) {
        return Ok(secs as f64);
    }

    match trimmed.parse::<f64>() {
        Ok(secs) if secs.is_finite() => Ok(secs),
        _ => Err(WorkflowError::time(value)),
    }
}

/// `H:MM`, `HH:MM`, `H:MM:SS` or `HH:MM:SS`.
fn parse_clock(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(parts[0], 1, 2) || !parts[1..].iter().all(|p| digits(*p, 2, 2)) {
        return None;
    }

    let hours: u64 = parts[0].parse().ok()?;
    let minutes: u64 = parts[1].parse().ok()?;
    let seconds: u64 = match parts.get(2) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Splits CSV text into records keyed by the required column names.
fn parse_csv_records(content: &str) -> Result<Vec<HashMap<&'static str, String>>, WorkflowError> {
    let rows = parse_csv_rows(content);
    let Some((headers, body)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let header_map: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (header.trim(), idx))
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|h| !header_map.contains_key(h))
        .collect();
    if !missing.is_empty() {
        return Err(WorkflowError::missing(&missing));
    }

    Ok(body
        .iter()
        .map(|cells| {
            REQUIRED_COLUMNS
                .iter()
                .map(|&column| {
                    let cell = cells
                        .get(header_map[column])
                        .map(|c| c.trim().to_string())
                        .unwrap_or_default();
                    (column, cell)
                })
                .collect()
        })
        .collect())
}

/// Minimal RFC 4180 tokenizer: quoted cells, `""` escapes, any line ending.
/// Blank lines are dropped.
fn parse_csv_rows(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => current.push(std::mem::take(&mut cell)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                current.push(std::mem::take(&mut cell));
                push_row(&mut rows, std::mem::take(&mut current));
            }
            _ => cell.push(ch),
        }
    }
    current.push(cell);
    push_row(&mut rows, current);

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.len() > 1 || row.first().is_some_and(|c| !c.is_empty()) {
        rows.push(row);
    }
}
