/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Summary block printed after the schedule trace.
//!
//! Pure aggregation over a finished [`ScheduleTrace`]; nothing here feeds
//! back into scheduling.
//!
//! ```text
//!
//! Total Energy Consumption: 412.306J
//! Percentage of time spent idle: 10.70%
//! Total System Execution Time: 1000s
//! Frequency distribution:          (DVFS runs only)
//!   1188 MHz: 57s (5.70%)
//!   …
//!   IDLE: 107s (10.70%)
//! Deadline misses: 2               (only when non-zero)
//! ```

use std::fmt;

use crate::power::{Frequency, PowerModel, ENERGY_UNIT_SUFFIX};
use crate::trace::{ScheduleTrace, IDLE_MARKER};

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub horizon: u64,
    pub total_energy: f64,
    pub idle_time: u64,
    /// Busy time per frequency, fastest first; every model frequency is
    /// listed, including unused ones.
    pub frequency_time: Vec<(Frequency, u64)>,
    pub deadline_misses: usize,
    pub dvfs: bool,
}

impl Report {
    pub fn from_trace(trace: &ScheduleTrace, power: &PowerModel) -> Self {
        let mut frequency_time: Vec<(Frequency, u64)> =
            power.frequencies().iter().map(|&f| (f, 0)).collect();
        let mut idle_time = 0;

        for entry in trace.entries() {
            match entry.activity.frequency() {
                None => idle_time += entry.duration,
                Some(freq) => {
                    if let Some((_, t)) = frequency_time.iter_mut().find(|(f, _)| *f == freq) {
                        *t += entry.duration;
                    }
                }
            }
        }

        Self {
            horizon: trace.horizon,
            total_energy: trace.total_energy(),
            idle_time,
            frequency_time,
            deadline_misses: trace.misses().len(),
            dvfs: trace.dvfs,
        }
    }

    /// `time` as a percentage of the horizon; `0.0` for an empty horizon.
    pub fn percent_of_horizon(&self, time: u64) -> f64 {
        if self.horizon == 0 {
            return 0.0;
        }
        time as f64 * 100.0 / self.horizon as f64
    }

    pub fn idle_percent(&self) -> f64 {
        self.percent_of_horizon(self.idle_time)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "Total Energy Consumption: {:.3}{ENERGY_UNIT_SUFFIX}",
            self.total_energy
        )?;
        writeln!(f, "Percentage of time spent idle: {:.2}%", self.idle_percent())?;
        writeln!(f, "Total System Execution Time: {}s", self.horizon)?;

        if self.dvfs {
            writeln!(f, "Frequency distribution:")?;
            for &(freq, time) in &self.frequency_time {
                writeln!(
                    f,
                    "  {freq} MHz: {time}s ({:.2}%)",
                    self.percent_of_horizon(time)
                )?;
            }
            writeln!(
                f,
                "  {IDLE_MARKER}: {}s ({:.2}%)",
                self.idle_time,
                self.idle_percent()
            )?;
        }

        if self.deadline_misses > 0 {
            writeln!(f, "Deadline misses: {}", self.deadline_misses)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
