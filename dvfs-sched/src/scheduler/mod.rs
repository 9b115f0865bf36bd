/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Discrete-event dispatch loop for one processor.
//!
//! [`Simulator`] runs a [`Workload`] under a fixed [`Policy`] up to the
//! workload's horizon and returns the resulting [`ScheduleTrace`].
//!
//! # Loop
//! Each [`step`](Simulator::step) is one transition of a small state machine:
//!
//! ```text
//!            ┌──────── ready set empty ───────┐
//!            ▼                                │
//!       IdleWait ──► release due jobs ──► Dispatching ──► … ──► Finished
//!                                                  (now == horizon)
//! ```
//!
//! 1. Release every job whose release time has arrived.
//! 2. Drop jobs whose deadline has passed (recorded as misses).
//! 3. Idle until the next release, or run the head of the ready set for one
//!    slice.  A slice ends at the earliest of: job completion, the time
//!    budget, the next release that would outrank the job, the horizon.
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Priority | A [`JobOrder`] function chosen once per run from the policy |
//! | Run state | [`SchedulerState`] local to `run()`; `Simulator` is immutable and reusable |
//! | Remaining work | Tracked in fastest-frequency units, debited by WCET ratio |
//! | Deadline miss | Tolerated: `warn!` plus a [`DeadlineMiss`] record |
//!
//! # Example
//! ```rust,ignore
//! let workload = Workload::load(path, &FrequencyProfile::reference())?;
//! let trace = Simulator::new(&workload, Policy::Edf, true).run();
//! ```

pub mod dvfs;
pub mod feasibility;
pub mod ready_set;

pub use dvfs::{FrequencyChoice, FrequencySelector};
pub use ready_set::{JobOrder, ReadySet};

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, info, warn};

use crate::task::JobInstance;
use crate::trace::{Activity, DeadlineMiss, ScheduleEntry, ScheduleTrace};
use crate::workload::Workload;

// ── Policy ────────────────────────────────────────────────────────────────────

/// Scheduling discipline, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Earliest-Deadline-First (dynamic priority).
    Edf,
    /// Rate-Monotonic (static priority by period).
    Rm,
}

impl Policy {
    /// The ready-set ordering for this policy.
    pub fn comparator(self) -> JobOrder {
        match self {
            Policy::Edf => edf_order,
            Policy::Rm => rm_order,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Edf => write!(f, "EDF"),
            Policy::Rm => write!(f, "RM"),
        }
    }
}

/// EDF: deadline, then shorter period, then earlier release, then catalog
/// position.
pub fn edf_order(a: &JobInstance<'_>, b: &JobInstance<'_>) -> Ordering {
    a.deadline
        .cmp(&b.deadline)
        .then_with(|| a.period().cmp(&b.period()))
        .then_with(|| a.release_index.cmp(&b.release_index))
        .then_with(|| a.task_index.cmp(&b.task_index))
}

/// RM: shorter period, then earlier release, then catalog position.
pub fn rm_order(a: &JobInstance<'_>, b: &JobInstance<'_>) -> Ordering {
    a.period()
        .cmp(&b.period())
        .then_with(|| a.release.cmp(&b.release))
        .then_with(|| a.task_index.cmp(&b.task_index))
}

// ── Loop state ────────────────────────────────────────────────────────────────

/// Dispatch-loop state after a [`Simulator::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing was ready; the processor idled until the next release.
    IdleWait,
    /// A job ran for one slice.
    Dispatching,
    /// Simulated time reached the horizon.
    Finished,
}

/// Per-run mutable state, owned by [`Simulator::run`].
#[derive(Debug)]
pub struct SchedulerState<'w> {
    pub now: u64,
    pub ready: ReadySet<'w>,
    /// Next release time per task, indexed like the task catalog.
    next_release: Vec<u64>,
}

impl<'w> SchedulerState<'w> {
    fn new(policy: Policy, task_count: usize) -> Self {
        Self {
            now: 0,
            ready: ReadySet::new(policy.comparator()),
            next_release: vec![0; task_count],
        }
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

pub struct Simulator<'w> {
    workload: &'w Workload,
    policy: Policy,
    dvfs: bool,
}

impl<'w> Simulator<'w> {
    pub fn new(workload: &'w Workload, policy: Policy, dvfs: bool) -> Self {
        Self {
            workload,
            policy,
            dvfs,
        }
    }

    /// Fresh state with every task due at time zero.
    pub fn initial_state(&self) -> SchedulerState<'w> {
        SchedulerState::new(self.policy, self.workload.tasks.len())
    }

    /// Simulate the whole horizon.
    pub fn run(&self) -> ScheduleTrace {
        let mut state = self.initial_state();
        let mut trace = ScheduleTrace::new(self.workload.horizon, self.dvfs);

        info!(
            policy = %self.policy,
            dvfs = self.dvfs,
            task_count = self.workload.tasks.len(),
            horizon = self.workload.horizon,
            "=== Simulation start ==="
        );

        while self.step(&mut state, &mut trace) != Phase::Finished {}

        info!(
            entries = trace.entries().len(),
            total_energy = trace.total_energy(),
            deadline_misses = trace.misses().len(),
            "=== Simulation complete ==="
        );
        trace
    }

    /// Advance the simulation by one idle period or one job slice.
    pub fn step(&self, state: &mut SchedulerState<'w>, trace: &mut ScheduleTrace) -> Phase {
        let horizon = self.workload.horizon;
        if state.now >= horizon {
            // Whatever is still queued with a deadline inside the horizon missed it.
            self.expire(state, trace);
            return Phase::Finished;
        }

        self.release_due(state);
        self.expire(state, trace);

        let Some(job) = state.ready.pop() else {
            let until = self.next_release_time(state).unwrap_or(horizon).min(horizon);
            let duration = until - state.now;
            trace.push(ScheduleEntry {
                start: state.now,
                activity: Activity::Idle,
                duration,
                energy: self.workload.power.idle_energy(duration),
            });
            debug!(start = state.now, duration, "idle");
            state.now = until;
            return Phase::IdleWait;
        };

        self.dispatch(job, state, trace);
        Phase::Dispatching
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    fn dispatch(&self, mut job: JobInstance<'w>, state: &mut SchedulerState<'w>, trace: &mut ScheduleTrace) {
        let now = state.now;
        let power = &self.workload.power;
        let selector = FrequencySelector::new(power);

        let preempt_at = self.preemption_point(state, &job);
        let budget = match self.policy {
            Policy::Edf => job.deadline - now,
            Policy::Rm => {
                let until_preempt = preempt_at.map_or(u64::MAX, |t| t - now);
                job.remaining().min(until_preempt)
            }
        };

        let choice = if self.dvfs {
            selector.select(&job, budget)
        } else {
            selector.fastest(&job)
        };

        let mut slice = choice
            .duration
            .min(budget)
            .min(self.workload.horizon - now);
        if let Some(t) = preempt_at {
            slice = slice.min(t - now);
        }
        debug_assert!(slice > 0, "every dispatch must advance time");

        let work = selector.work_done(&job, choice.frequency, slice);
        job.consume(work);

        debug!(
            task = job.name(),
            start = now,
            deadline = job.deadline,
            budget,
            freq = %choice.frequency,
            planned = choice.duration,
            slice,
            work,
            remaining = job.remaining(),
            feasible = choice.feasible,
            "dispatch"
        );

        trace.push(ScheduleEntry {
            start: now,
            activity: Activity::Run {
                task: job.name().to_string(),
                frequency: choice.frequency,
            },
            duration: slice,
            energy: power.active_energy(choice.frequency, slice),
        });
        state.now = now + slice;

        if !job.is_finished() {
            state.ready.insert(job);
        } else if state.now > job.deadline {
            Self::record_miss(trace, &job, state.now);
        }
    }

    /// Earliest upcoming release whose job would outrank `job`.
    ///
    /// Under RM that is the next release of a strictly shorter-period task;
    /// under EDF, the next release with an earlier deadline.
    fn preemption_point(&self, state: &SchedulerState<'w>, job: &JobInstance<'w>) -> Option<u64> {
        let order = self.policy.comparator();
        let fastest = self.workload.power.fastest();

        self.workload
            .tasks
            .iter()
            .enumerate()
            .filter_map(|(i, task)| {
                let at = state.next_release[i];
                if at >= self.workload.horizon {
                    return None;
                }
                let candidate = JobInstance::release(task, i, at / task.period, fastest);
                (order(&candidate, job) == Ordering::Less).then_some(at)
            })
            .min()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Releases and expiry
    // ─────────────────────────────────────────────────────────────────────────

    /// Release every job whose release time is at or before `now` and inside
    /// the horizon.
    fn release_due(&self, state: &mut SchedulerState<'w>) {
        let fastest = self.workload.power.fastest();
        let horizon = self.workload.horizon;

        for (i, task) in self.workload.tasks.iter().enumerate() {
            while state.next_release[i] <= state.now && state.next_release[i] < horizon {
                let at = state.next_release[i];
                let job = JobInstance::release(task, i, at / task.period, fastest);
                debug!(
                    task = %task.name,
                    release = job.release,
                    deadline = job.deadline,
                    work = job.remaining(),
                    "released"
                );
                state.ready.insert(job);
                state.next_release[i] = at.saturating_add(task.period);
            }
        }
    }

    /// Earliest pending release inside the horizon.
    fn next_release_time(&self, state: &SchedulerState<'w>) -> Option<u64> {
        state
            .next_release
            .iter()
            .copied()
            .filter(|&t| t < self.workload.horizon)
            .min()
    }

    fn expire(&self, state: &mut SchedulerState<'w>, trace: &mut ScheduleTrace) {
        for job in state.ready.revalidate(state.now) {
            Self::record_miss(trace, &job, state.now);
        }
    }

    fn record_miss(trace: &mut ScheduleTrace, job: &JobInstance<'_>, now: u64) {
        warn!(
            task = job.name(),
            release = job.release,
            deadline = job.deadline,
            observed_at = now,
            remaining = job.remaining(),
            "deadline miss"
        );
        trace.record_miss(DeadlineMiss {
            task: job.name().to_string(),
            release: job.release,
            deadline: job.deadline,
            observed_at: now,
            remaining: job.remaining(),
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FrequencyProfile;
    use crate::power::Frequency;

    const F1: Frequency = Frequency(1188);
    const F3: Frequency = Frequency(648);

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn workload(input: &str) -> Workload {
        Workload::parse(input, &FrequencyProfile::reference()).unwrap()
    }

    /// `(start, task-or-IDLE, duration)` for every entry.
    fn timeline(trace: &ScheduleTrace) -> Vec<(u64, String, u64)> {
        trace
            .entries()
            .iter()
            .map(|e| {
                let who = e.activity.task().unwrap_or("IDLE").to_string();
                (e.start, who, e.duration)
            })
            .collect()
    }

    fn slot(start: u64, who: &str, duration: u64) -> (u64, String, u64) {
        (start, who.to_string(), duration)
    }

    fn assert_time_conserved(trace: &ScheduleTrace) {
        let mut cursor = 0;
        for e in trace.entries() {
            assert_eq!(e.start, cursor, "entries must be contiguous");
            assert!(e.duration > 0);
            cursor += e.duration;
        }
        assert_eq!(cursor, trace.horizon, "durations must sum to the horizon");
    }

    /// Five-task sample in the reference input format.
    const SAMPLE: &str = "\
5 1000 625 447 307 212 84
w1 520 53 66 89 141
w2 220 40 50 67 114
w3 500 104 134 184 313
w4 200 57 74 103 175
w5 300 35 45 62 104
";

    // ── Comparators ───────────────────────────────────────────────────────────

    #[test]
    fn edf_orders_by_deadline_then_period_then_release() {
        let w = workload("3 100 4 3 2 1 1\na 10 1 1 1 1\nb 20 1 1 1 1\nc 5 1 1 1 1\n");
        let a1 = JobInstance::release(&w.tasks[0], 0, 1, F1); // deadline 20, period 10
        let b0 = JobInstance::release(&w.tasks[1], 1, 0, F1); // deadline 20, period 20
        let c3 = JobInstance::release(&w.tasks[2], 2, 3, F1); // deadline 20, period 5
        let a0 = JobInstance::release(&w.tasks[0], 0, 0, F1); // deadline 10

        assert_eq!(edf_order(&a0, &a1), Ordering::Less);
        assert_eq!(edf_order(&c3, &a1), Ordering::Less, "shorter period wins a deadline tie");
        assert_eq!(edf_order(&a1, &b0), Ordering::Less);
        assert_eq!(edf_order(&a1, &a1.clone()), Ordering::Equal);
    }

    #[test]
    fn rm_orders_by_period_only_first() {
        let w = workload("2 100 4 3 2 1 1\nfast 10 1 1 1 1\nslow 20 1 1 1 1\n");
        let fast9 = JobInstance::release(&w.tasks[0], 0, 9, F1); // deadline 100
        let slow0 = JobInstance::release(&w.tasks[1], 1, 0, F1); // deadline 20
        assert_eq!(rm_order(&fast9, &slow0), Ordering::Less);
        assert_eq!(edf_order(&fast9, &slow0), Ordering::Greater);
    }

    #[test]
    fn policy_displays_cli_token() {
        assert_eq!(Policy::Edf.to_string(), "EDF");
        assert_eq!(Policy::Rm.to_string(), "RM");
    }

    // ── Concrete scenarios ────────────────────────────────────────────────────

    #[test]
    fn rm_two_task_scenario() {
        // A: period 4, WCET 2 ; B: period 8, WCET 2 ; horizon 8
        let w = workload("2 8 100 80 60 40 10\nA 4 2 3 4 5\nB 8 2 3 4 5\n");
        let trace = Simulator::new(&w, Policy::Rm, false).run();

        assert_eq!(
            timeline(&trace),
            vec![
                slot(0, "A", 2),
                slot(2, "B", 2),
                slot(4, "A", 2),
                slot(6, "IDLE", 2),
            ]
        );
        assert!(trace.misses().is_empty());
        assert_time_conserved(&trace);
    }

    #[test]
    fn edf_dvfs_single_task_picks_half_frequency() {
        // WCET 5 at 1188 MHz, 10 at 648 MHz; deadline 10; no slack left at 648
        let w = workload("1 10 1000 600 300 150 50\nT 10 5 7 10 14\n");
        let trace = Simulator::new(&w, Policy::Edf, true).run();

        assert_eq!(trace.entries().len(), 1);
        let e = &trace.entries()[0];
        assert_eq!(e.activity.frequency(), Some(F3));
        assert_eq!(e.duration, 10);
        assert!((e.energy - 3.0).abs() < 1e-9);
        assert!(trace.misses().is_empty());
    }

    #[test]
    fn edf_dvfs_races_to_idle_when_fast_is_cheaper() {
        // Fast: 100×5 + 1×5 = 505 ; 648 MHz: 90×10 = 900
        let w = workload("1 10 100 95 90 85 1\nT 10 5 7 10 14\n");
        let trace = Simulator::new(&w, Policy::Edf, true).run();

        assert_eq!(
            timeline(&trace),
            vec![slot(0, "T", 5), slot(5, "IDLE", 5)]
        );
        assert_eq!(trace.entries()[0].activity.frequency(), Some(F1));
    }

    // ── Preemption ────────────────────────────────────────────────────────────

    #[test]
    fn edf_preempts_for_earlier_deadline_release() {
        // A: period 5, WCET 1 ; B: period 20, WCET 8
        let w = workload("2 20 100 80 60 40 10\nA 5 1 2 3 4\nB 20 8 9 10 11\n");
        let trace = Simulator::new(&w, Policy::Edf, false).run();

        assert_eq!(
            timeline(&trace),
            vec![
                slot(0, "A", 1),
                slot(1, "B", 4),
                slot(5, "A", 1),
                slot(6, "B", 4),
                slot(10, "A", 1),
                slot(11, "IDLE", 4),
                slot(15, "A", 1),
                slot(16, "IDLE", 4),
            ]
        );
        assert!(trace.misses().is_empty());
        assert_time_conserved(&trace);
    }

    #[test]
    fn edf_deadline_tie_goes_to_shorter_period_release() {
        // A's job released at 3 has deadline 6, the same as B's running job;
        // the shorter period wins the tie and preempts B.
        let w = workload("2 12 100 80 60 40 10\nA 3 1 1 1 1\nB 6 4 4 4 4\n");
        let trace = Simulator::new(&w, Policy::Edf, false).run();
        assert_time_conserved(&trace);
        assert_eq!(
            timeline(&trace)[..4],
            [
                slot(0, "A", 1),
                slot(1, "B", 2),
                slot(3, "A", 1),
                slot(4, "B", 2)
            ]
        );
        assert!(trace.misses().is_empty());
    }

    #[test]
    fn rm_three_task_timeline() {
        // A: 4/1, B: 6/2, C: 12/3, U = 0.833
        let w = workload("3 12 100 80 60 40 10\nA 4 1 2 3 4\nB 6 2 3 4 5\nC 12 3 4 5 6\n");
        let trace = Simulator::new(&w, Policy::Rm, false).run();
        assert_eq!(
            timeline(&trace),
            vec![
                slot(0, "A", 1),
                slot(1, "B", 2),
                slot(3, "C", 1),
                slot(4, "A", 1),
                slot(5, "C", 1),
                slot(6, "B", 2),
                slot(8, "A", 1),
                slot(9, "C", 1),
                slot(10, "IDLE", 2),
            ]
        );
        assert!(trace.misses().is_empty());
    }

    #[test]
    fn rm_never_runs_longer_period_while_shorter_is_ready() {
        let w = workload(SAMPLE);
        let sim = Simulator::new(&w, Policy::Rm, false);
        let mut state = sim.initial_state();
        let mut trace = ScheduleTrace::new(w.horizon, false);

        loop {
            match sim.step(&mut state, &mut trace) {
                Phase::Finished => break,
                Phase::IdleWait => {}
                Phase::Dispatching => {
                    let last = trace.entries().last().unwrap();
                    let ran = last.activity.task().unwrap();
                    let ran_period = w.tasks.iter().find(|t| t.name == ran).unwrap().period;
                    // Everything still queued was ready when `ran` was picked
                    for job in state.ready.iter() {
                        assert!(
                            job.period() >= ran_period,
                            "{ran} (period {ran_period}) ran at {} while {} (period {}) was ready",
                            last.start,
                            job.name(),
                            job.period()
                        );
                    }
                }
            }
        }
        assert_time_conserved(&trace);
    }

    // ── Global properties ─────────────────────────────────────────────────────

    #[test]
    fn time_is_conserved_for_every_mode() {
        let w = workload(SAMPLE);
        for policy in [Policy::Edf, Policy::Rm] {
            for dvfs in [false, true] {
                let trace = Simulator::new(&w, policy, dvfs).run();
                assert_time_conserved(&trace);
            }
        }
    }

    #[test]
    fn energy_is_non_negative_and_additive() {
        let w = workload(SAMPLE);
        let trace = Simulator::new(&w, Policy::Edf, true).run();
        let mut sum = 0.0;
        for e in trace.entries() {
            assert!(e.energy >= 0.0);
            sum += e.energy;
        }
        assert!((trace.total_energy() - sum).abs() < 1e-9);
    }

    #[test]
    fn no_dvfs_always_uses_fastest_and_is_deterministic() {
        let w = workload(SAMPLE);
        for policy in [Policy::Edf, Policy::Rm] {
            let first = Simulator::new(&w, policy, false).run();
            let second = Simulator::new(&w, policy, false).run();
            assert_eq!(first.to_string(), second.to_string());
            for e in first.entries() {
                if let Some(f) = e.activity.frequency() {
                    assert_eq!(f, F1);
                }
            }
        }
    }

    #[test]
    fn dvfs_runs_are_deterministic() {
        let w = workload(SAMPLE);
        let a = Simulator::new(&w, Policy::Edf, true).run();
        let b = Simulator::new(&w, Policy::Edf, true).run();
        assert_eq!(a, b);
    }

    #[test]
    fn dvfs_lowers_energy_without_dropping_work() {
        // Two jobs; at 648 MHz each fills its 10 s window exactly
        let w = workload("1 20 1000 600 300 150 50\nT 10 5 7 10 14\n");
        let plain = Simulator::new(&w, Policy::Edf, false).run();
        let dvfs = Simulator::new(&w, Policy::Edf, true).run();

        assert!(plain.misses().is_empty());
        assert!(dvfs.misses().is_empty());
        // 2 × (1000×5 + 50×5) mW·s vs 2 × 300×10 mW·s
        assert!((plain.total_energy() - 10.5).abs() < 1e-9);
        assert!((dvfs.total_energy() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn dvfs_on_the_sample_saves_energy_but_misses_deadlines() {
        // Each slice is sized against the running job's own deadline only,
        // so slow choices starve later jobs on this set.
        let w = workload(SAMPLE);
        let plain = Simulator::new(&w, Policy::Edf, false).run();
        let dvfs = Simulator::new(&w, Policy::Edf, true).run();

        assert!(plain.misses().is_empty());
        assert_eq!(dvfs.misses().len(), 5);
        assert!(dvfs.misses().iter().all(|m| m.remaining > 0));
        assert!(dvfs.total_energy() < plain.total_energy());
    }

    #[test]
    fn edf_never_runs_a_later_deadline_while_an_earlier_one_is_ready() {
        for dvfs in [false, true] {
            let w = workload(SAMPLE);
            let sim = Simulator::new(&w, Policy::Edf, dvfs);
            let mut state = sim.initial_state();
            let mut trace = ScheduleTrace::new(w.horizon, dvfs);

            loop {
                match sim.step(&mut state, &mut trace) {
                    Phase::Finished => break,
                    Phase::IdleWait => {}
                    Phase::Dispatching => {
                        let last = trace.entries().last().unwrap();
                        let ran = last.activity.task().unwrap();
                        let period = w.tasks.iter().find(|t| t.name == ran).unwrap().period;
                        // The only live job of a task at `start` is its latest release
                        let ran_deadline = (last.start / period + 1) * period;
                        for job in state.ready.iter().filter(|j| j.release <= last.start) {
                            assert!(
                                job.deadline >= ran_deadline,
                                "{ran} (deadline {ran_deadline}) ran at {} while {} (deadline {}) was ready",
                                last.start,
                                job.name(),
                                job.deadline
                            );
                        }
                    }
                }
            }
            assert_time_conserved(&trace);
        }
    }

    #[test]
    fn releases_near_the_end_of_time_saturate() {
        // Second release lands at 10^19; the third would overflow u64
        let w = workload("1 18446744073709551615 100 80 60 40 10\nT 10000000000000000000 1 2 3 4\n");
        let trace = Simulator::new(&w, Policy::Edf, false).run();
        assert_time_conserved(&trace);
        assert_eq!(
            timeline(&trace),
            vec![
                slot(0, "T", 1),
                slot(1, "IDLE", 9_999_999_999_999_999_999),
                slot(10_000_000_000_000_000_000, "T", 1),
                slot(10_000_000_000_000_000_001, "IDLE", 8_446_744_073_709_551_614),
            ]
        );
        assert!(trace.misses().is_empty());
    }

    #[test]
    fn edf_dvfs_slices_never_cross_the_running_jobs_deadline() {
        let w = workload(SAMPLE);
        let trace = Simulator::new(&w, Policy::Edf, true).run();
        assert_time_conserved(&trace);

        for e in trace.entries() {
            let Some(name) = e.activity.task() else {
                continue;
            };
            let period = w.tasks.iter().find(|t| t.name == name).unwrap().period;
            // The only live job of a task at `start` is the latest release
            let deadline = (e.start / period + 1) * period;
            assert!(
                e.end() <= deadline,
                "{name} ran {}..{} past deadline {deadline}",
                e.start,
                e.end()
            );
        }
    }

    // ── Overload ──────────────────────────────────────────────────────────────

    #[test]
    fn edf_overload_records_misses_and_still_finishes() {
        // U = 3/4 + 3/4 = 1.5
        let w = workload("2 8 100 80 60 40 10\nA 4 3 4 5 6\nB 4 3 4 5 6\n");
        let trace = Simulator::new(&w, Policy::Edf, true).run();
        assert_time_conserved(&trace);
        assert!(!trace.misses().is_empty());
        assert!(trace.misses().iter().all(|m| m.remaining > 0));
    }

    #[test]
    fn rm_overload_drops_unfinished_job_at_horizon() {
        // U = 1/2 + 3/4 > 1 ; B has 1 unit left at its deadline 4
        let w = workload("2 4 100 80 60 40 10\nA 2 1 1 1 1\nB 4 3 3 3 3\n");
        let trace = Simulator::new(&w, Policy::Rm, false).run();
        assert_eq!(
            timeline(&trace),
            vec![slot(0, "A", 1), slot(1, "B", 1), slot(2, "A", 1), slot(3, "B", 1)]
        );
        assert_eq!(
            trace.misses(),
            &[DeadlineMiss {
                task: "B".into(),
                release: 0,
                deadline: 4,
                observed_at: 4,
                remaining: 1,
            }]
        );
    }

    #[test]
    fn rm_overrun_completes_late() {
        // WCET 5 > period 4: RM does not cut a slice at the job's own deadline
        let w = workload("1 8 100 80 60 40 10\nT 4 5 6 7 8\n");
        let trace = Simulator::new(&w, Policy::Rm, false).run();
        assert_eq!(timeline(&trace), vec![slot(0, "T", 5), slot(5, "T", 3)]);

        let misses = trace.misses();
        assert_eq!(misses.len(), 2);
        // First job finished, one second late
        assert_eq!((misses[0].deadline, misses[0].observed_at, misses[0].remaining), (4, 5, 0));
        // Second job (released at 4, dispatched at 5) is cut off by the horizon
        assert_eq!((misses[1].release, misses[1].deadline, misses[1].remaining), (4, 8, 2));
    }

    #[test]
    fn empty_task_set_idles_for_the_horizon() {
        let w = workload("0 7 4 3 2 1 2\n");
        let trace = Simulator::new(&w, Policy::Edf, true).run();
        assert_eq!(timeline(&trace), vec![slot(0, "IDLE", 7)]);
        assert!((trace.total_energy() - 0.014).abs() < 1e-12);
    }

    #[test]
    fn step_reports_phases() {
        let w = workload("1 10 100 80 60 40 10\nT 10 4 5 6 7\n");
        let sim = Simulator::new(&w, Policy::Edf, false);
        let mut state = sim.initial_state();
        let mut trace = ScheduleTrace::new(w.horizon, false);

        assert_eq!(sim.step(&mut state, &mut trace), Phase::Dispatching);
        assert_eq!(state.now, 4);
        assert_eq!(sim.step(&mut state, &mut trace), Phase::IdleWait);
        assert_eq!(state.now, 10);
        assert_eq!(sim.step(&mut state, &mut trace), Phase::Finished);
    }
}
