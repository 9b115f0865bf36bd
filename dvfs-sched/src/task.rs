/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the scheduling simulator.
//!
//! Two distinct types model the two sides of the dispatch loop:
//!
//! ```text
//! input file ──►  Task  ──(release every period)──►  JobInstance  ──►  ReadySet
//!                  ↑ immutable catalog entry           ↑ mutable, one per release
//! ```
//!
//! # Ownership model
//! `Task`s live in the [`Workload`](crate::workload::Workload) for the whole
//! run.  A `JobInstance` borrows its task and is owned by whichever part of the
//! dispatch loop currently holds it: the ready set, or the loop itself between
//! extraction and re-insertion.  No two places can observe the same instance.

use std::collections::BTreeMap;

use crate::power::Frequency;

// ── Task (catalog entry) ──────────────────────────────────────────────────────

/// Immutable description of one periodic task.
///
/// WCET values are stored independently per frequency; they are **not**
/// derived from one another because tasks differ in how compute- or
/// memory-bound they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique task name within a workload.
    pub name: String,

    /// Release period in seconds, also the implicit relative deadline.
    pub period: u64,

    /// Worst-case execution time (seconds) at each supported frequency.
    pub wcet: BTreeMap<Frequency, u64>,
}

impl Task {
    pub fn new(name: impl Into<String>, period: u64, wcet: BTreeMap<Frequency, u64>) -> Self {
        Self {
            name: name.into(),
            period,
            wcet,
        }
    }

    /// WCET at `freq`, or `None` if the task has no entry for it.
    pub fn wcet_at(&self, freq: Frequency) -> Option<u64> {
        self.wcet.get(&freq).copied()
    }

    /// Utilisation at `freq`: `wcet / period`.
    ///
    /// Returns `0.0` when `period` is zero or the frequency is unknown.
    pub fn utilization_at(&self, freq: Frequency) -> f64 {
        match self.wcet_at(freq) {
            Some(wcet) if self.period > 0 => wcet as f64 / self.period as f64,
            _ => 0.0,
        }
    }
}

// ── JobInstance ───────────────────────────────────────────────────────────────

/// One released occurrence of a [`Task`].
///
/// `remaining` is tracked in fastest-frequency time units and only ever
/// decreases.  `deadline` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInstance<'a> {
    /// Catalog entry this job belongs to.
    pub task: &'a Task,

    /// Position of `task` in the catalog; last-resort ordering key.
    pub task_index: usize,

    /// Which release of the task this is (`0` for the release at time 0).
    pub release_index: u64,

    /// Absolute release time.
    pub release: u64,

    /// Absolute deadline, `release + period`.
    pub deadline: u64,

    remaining: u64,
}

impl<'a> JobInstance<'a> {
    /// Release job number `release_index` of `task`.
    ///
    /// The initial remaining work is the task's WCET at `fastest`; a task
    /// without an entry for `fastest` gets zero work.
    pub fn release(task: &'a Task, task_index: usize, release_index: u64, fastest: Frequency) -> Self {
        let release = release_index.saturating_mul(task.period);
        Self {
            task,
            task_index,
            release_index,
            release,
            deadline: release.saturating_add(task.period),
            remaining: task.wcet_at(fastest).unwrap_or(0),
        }
    }

    /// Remaining work in fastest-frequency time units.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Debit `work` fastest-frequency units, clamping at zero.
    pub fn consume(&mut self, work: u64) {
        self.remaining = self.remaining.saturating_sub(work);
    }

    pub fn name(&self) -> &str {
        &self.task.name
    }

    pub fn period(&self) -> u64 {
        self.task.period
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
