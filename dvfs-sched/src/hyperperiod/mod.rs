/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Hyperperiod of a periodic task set.
//!
//! The hyperperiod is the LCM of all task periods: the smallest window after
//! which the release pattern repeats.  A simulation horizon that is a whole
//! multiple of it observes every task phase equally often, so the run logs a
//! warning when the horizon cuts a hyperperiod short.

pub mod math;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::task::Task;
use math::lcm_all;

// ── Error type ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HyperperiodError {
    /// The task slice was empty (or every task had a zero period).
    #[error("no tasks with a valid (non-zero) period")]
    NoValidPeriods,

    /// LCM calculation overflowed `u64`.
    #[error("LCM overflow computing lcm({a}, {b})")]
    Overflow { a: u64, b: u64 },
}

// ── HyperperiodInfo ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperperiodInfo {
    /// LCM of all unique task periods, in seconds.
    pub hyperperiod: u64,

    /// Unique periods present in the task set (sorted, deduplicated).
    pub unique_periods: Vec<u64>,

    /// Number of tasks that contributed.
    pub task_count: usize,
}

impl HyperperiodInfo {
    /// Whether `horizon` spans a whole number of hyperperiods.
    pub fn divides(&self, horizon: u64) -> bool {
        self.hyperperiod != 0 && horizon % self.hyperperiod == 0
    }
}

/// Compute the hyperperiod of `tasks`, ignoring zero periods.
pub fn calculate_hyperperiod(tasks: &[Task]) -> Result<HyperperiodInfo, HyperperiodError> {
    let mut unique_periods: Vec<u64> = tasks
        .iter()
        .map(|t| t.period)
        .filter(|&p| p > 0)
        .collect();
    let task_count = unique_periods.len();
    if task_count == 0 {
        return Err(HyperperiodError::NoValidPeriods);
    }
    unique_periods.sort_unstable();
    unique_periods.dedup();

    let hyperperiod = lcm_all(unique_periods.iter().copied())?;
    debug!(periods = ?unique_periods, hyperperiod, "hyperperiod computed");

    Ok(HyperperiodInfo {
        hyperperiod,
        unique_periods,
        task_count,
    })
}

/// Log the hyperperiod of `tasks` and warn when `horizon` is not a multiple
/// of it.  Never fails; errors are logged.
pub fn log_horizon_alignment(tasks: &[Task], horizon: u64) -> Option<HyperperiodInfo> {
    match calculate_hyperperiod(tasks) {
        Ok(info) => {
            info!(
                hyperperiod = info.hyperperiod,
                unique_count = info.unique_periods.len(),
                horizon,
                "Calculated hyperperiod"
            );
            if !info.divides(horizon) {
                warn!(
                    hyperperiod = info.hyperperiod,
                    horizon,
                    "horizon is not a multiple of the hyperperiod; the last hyperperiod is truncated"
                );
            }
            Some(info)
        }
        Err(e) => {
            warn!("Hyperperiod unavailable: {e}");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
