/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Workload input parsing.
//!
//! The input text format, for a profile with `F` frequencies:
//!
//! ```text
//! <task_count> <horizon> <active_power_f1> … <active_power_fF> <idle_power>
//! <task_name> <period> <wcet_f1> … <wcet_fF>      (task_count lines)
//! ```
//!
//! Power and WCET columns map positionally onto the profile's frequencies,
//! fastest first.  Blank lines are skipped.

pub mod error;

pub use error::WorkloadError;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use crate::config::FrequencyProfile;
use crate::power::{Frequency, PowerModel};
use crate::task::Task;

/// Fully parsed simulation input: task catalog, power model and horizon.
#[derive(Debug, Clone)]
pub struct Workload {
    pub tasks: Vec<Task>,
    pub power: PowerModel,
    /// Simulated time span in seconds.
    pub horizon: u64,
}

impl Workload {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path, profile: &FrequencyProfile) -> Result<Self, WorkloadError> {
        let content = std::fs::read_to_string(path).map_err(|source| WorkloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let workload = Self::parse(&content, profile)?;

        info!(
            path = %path.display(),
            task_count = workload.tasks.len(),
            horizon = workload.horizon,
            frequencies = ?workload.power.frequencies(),
            "Workload loaded"
        );
        Ok(workload)
    }

    /// Parse workload text against `profile`.
    pub fn parse(content: &str, profile: &FrequencyProfile) -> Result<Self, WorkloadError> {
        let freqs = profile.frequencies();
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.split_whitespace().collect::<Vec<_>>()))
            .filter(|(_, fields)| !fields.is_empty());

        // ── Header ────────────────────────────────────────────────────────────
        let (line_no, header) = lines.next().ok_or(WorkloadError::Empty)?;
        expect_fields(line_no, &header, 3 + freqs.len())?;

        let task_count = parse_field(line_no, "task_count", header[0])? as usize;
        let horizon = parse_field(line_no, "horizon", header[1])?;

        let mut active = Vec::with_capacity(freqs.len());
        for (i, &freq) in freqs.iter().enumerate() {
            let field = format!("active_power_{}", freq);
            active.push((freq, parse_field(line_no, &field, header[2 + i])?));
        }
        let idle = parse_field(line_no, "idle_power", header[2 + freqs.len()])?;

        // Profile guarantees at least one frequency.
        let power = PowerModel::new(active, idle).ok_or(WorkloadError::Empty)?;

        // ── Task lines ────────────────────────────────────────────────────────
        // task_count is unchecked input; the vector grows with the lines actually present
        let mut tasks: Vec<Task> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (line_no, fields) in lines {
            if tasks.len() == task_count {
                return Err(WorkloadError::TaskCountMismatch {
                    declared: task_count,
                    found: task_count + 1,
                });
            }
            let task = parse_task(line_no, &fields, freqs)?;
            if !seen.insert(task.name.clone()) {
                return Err(WorkloadError::DuplicateTask {
                    line: line_no,
                    name: task.name,
                });
            }
            debug!(task = %task.name, period = task.period, wcet = ?task.wcet, "task parsed");
            tasks.push(task);
        }

        if tasks.len() != task_count {
            return Err(WorkloadError::TaskCountMismatch {
                declared: task_count,
                found: tasks.len(),
            });
        }

        Ok(Self {
            tasks,
            power,
            horizon,
        })
    }
}

fn parse_task(line_no: usize, fields: &[&str], freqs: &[Frequency]) -> Result<Task, WorkloadError> {
    expect_fields(line_no, fields, 2 + freqs.len())?;

    let name = fields[0].to_string();
    let period = parse_field(line_no, "period", fields[1])?;
    if period == 0 {
        return Err(WorkloadError::ZeroPeriod {
            line: line_no,
            name,
        });
    }

    let mut wcet = BTreeMap::new();
    for (i, &freq) in freqs.iter().enumerate() {
        let value = parse_field(line_no, &format!("wcet_{}", freq), fields[2 + i])?;
        if value == 0 {
            return Err(WorkloadError::ZeroWcet {
                line: line_no,
                name,
                freq_mhz: freq.mhz(),
            });
        }
        wcet.insert(freq, value);
    }

    Ok(Task::new(name, period, wcet))
}

fn expect_fields(line: usize, fields: &[&str], expected: usize) -> Result<(), WorkloadError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(WorkloadError::FieldCount {
            line,
            expected,
            found: fields.len(),
        })
    }
}

fn parse_field(line: usize, field: &str, value: &str) -> Result<u64, WorkloadError> {
    value.parse().map_err(|_| WorkloadError::InvalidNumber {
        line,
        field: field.to_string(),
        value: value.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
