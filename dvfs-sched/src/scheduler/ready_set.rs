/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Released, unfinished job instances ordered by the run's policy.
//!
//! The ordering is an explicit [`JobOrder`] function handed in once at
//! construction; jobs carry no priority state of their own.  Internally the
//! jobs are kept sorted lowest priority first, so the head is the last
//! element and `pop` is O(1).

use std::cmp::Ordering;

use crate::task::JobInstance;

/// Total order over jobs: `Less` means "runs first".
pub type JobOrder = fn(&JobInstance<'_>, &JobInstance<'_>) -> Ordering;

pub struct ReadySet<'a> {
    order: JobOrder,
    jobs: Vec<JobInstance<'a>>,
}

impl std::fmt::Debug for ReadySet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadySet").field("jobs", &self.jobs).finish()
    }
}

impl<'a> ReadySet<'a> {
    pub fn new(order: JobOrder) -> Self {
        Self {
            order,
            jobs: Vec::new(),
        }
    }

    pub fn insert(&mut self, job: JobInstance<'a>) {
        let order = self.order;
        let pos = self
            .jobs
            .partition_point(|queued| order(queued, &job) == Ordering::Greater);
        self.jobs.insert(pos, job);
    }

    /// Remove and return the highest-priority job.
    pub fn pop(&mut self) -> Option<JobInstance<'a>> {
        self.jobs.pop()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = &JobInstance<'a>> {
        self.jobs.iter().rev()
    }

    /// Drop finished jobs and jobs whose deadline is at or before `now`.
    ///
    /// Returns the jobs dropped with work still outstanding (deadline
    /// misses), highest priority first.
    pub fn revalidate(&mut self, now: u64) -> Vec<JobInstance<'a>> {
        let (keep, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.jobs)
            .into_iter()
            .partition(|job| !job.is_finished() && job.deadline > now);
        self.jobs = keep;

        dropped
            .into_iter()
            .rev()
            .filter(|job| !job.is_finished())
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
