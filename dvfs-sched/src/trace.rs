/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Append-only schedule trace produced by the dispatch loop.
//!
//! Entries are contiguous: each one starts where the previous one ended, and
//! the durations of a finished trace add up to the horizon.

use std::fmt;

use crate::power::{Frequency, ENERGY_UNIT_SUFFIX};

/// Marker printed for idle entries, in both the subject and frequency columns.
pub const IDLE_MARKER: &str = "IDLE";

// ── Activity ──────────────────────────────────────────────────────────────────

/// What the processor did during one entry.
///
/// A running entry always carries both a task and a frequency; an idle entry
/// carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Run { task: String, frequency: Frequency },
}

impl Activity {
    /// Task name, or `None` when idle.
    pub fn task(&self) -> Option<&str> {
        match self {
            Activity::Idle => None,
            Activity::Run { task, .. } => Some(task),
        }
    }

    /// Frequency used, or `None` when idle.
    pub fn frequency(&self) -> Option<Frequency> {
        match self {
            Activity::Idle => None,
            Activity::Run { frequency, .. } => Some(*frequency),
        }
    }
}

// ── ScheduleEntry ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub start: u64,
    pub activity: Activity,
    pub duration: u64,
    /// Joules consumed during the entry.
    pub energy: f64,
}

impl ScheduleEntry {
    pub fn end(&self) -> u64 {
        self.start + self.duration
    }
}

impl fmt::Display for ScheduleEntry {
    /// `<start> <subject> <frequency> <duration> <energy>J`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.activity {
            Activity::Idle => write!(f, "{} {IDLE_MARKER} {IDLE_MARKER}", self.start)?,
            Activity::Run { task, frequency } => write!(f, "{} {task} {frequency}", self.start)?,
        }
        write!(f, " {} {:.3}{ENERGY_UNIT_SUFFIX}", self.duration, self.energy)
    }
}

// ── DeadlineMiss ──────────────────────────────────────────────────────────────

/// A job that did not finish by its absolute deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineMiss {
    pub task: String,
    pub release: u64,
    pub deadline: u64,
    /// Simulated time at which the miss was detected.
    pub observed_at: u64,
    /// Work (fastest-frequency units) left when the job was discarded; `0`
    /// when the job did finish, just late.
    pub remaining: u64,
}

// ── ScheduleTrace ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleTrace {
    pub horizon: u64,
    pub dvfs: bool,
    entries: Vec<ScheduleEntry>,
    misses: Vec<DeadlineMiss>,
}

impl ScheduleTrace {
    pub fn new(horizon: u64, dvfs: bool) -> Self {
        Self {
            horizon,
            dvfs,
            ..Default::default()
        }
    }

    /// Append an entry.  Zero-length entries are dropped.
    pub fn push(&mut self, entry: ScheduleEntry) {
        debug_assert_eq!(
            entry.start,
            self.end(),
            "schedule entries must be contiguous"
        );
        if entry.duration > 0 {
            self.entries.push(entry);
        }
    }

    pub fn record_miss(&mut self, miss: DeadlineMiss) {
        self.misses.push(miss);
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn misses(&self) -> &[DeadlineMiss] {
        &self.misses
    }

    /// End time of the last entry (`0` for an empty trace).
    pub fn end(&self) -> u64 {
        self.entries.last().map(ScheduleEntry::end).unwrap_or(0)
    }

    pub fn total_energy(&self) -> f64 {
        self.entries.iter().map(|e| e.energy).sum()
    }
}

impl fmt::Display for ScheduleTrace {
    /// One line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
