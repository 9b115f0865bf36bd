/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Energy-minimal frequency selection.
//!
//! For a job and a time budget (time until the next priority-relevant event)
//! every frequency whose scaled execution time fits the budget is a
//! candidate.  Each candidate is charged its active energy plus idle energy
//! for the slack it leaves before the event:
//!
//! ```text
//! cost(f) = P_active(f) × d(f) + P_idle × (budget − d(f))
//! ```
//!
//! The cheapest candidate wins; on an exact tie the slower frequency wins.
//! Costs are compared in integer mW·s so ties are exact.  If nothing fits,
//! the job runs best-effort at the fastest frequency.

use tracing::debug;

use crate::power::{Frequency, PowerModel};
use crate::task::JobInstance;

/// Outcome of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyChoice {
    pub frequency: Frequency,
    /// Planned execution time at `frequency`.
    pub duration: u64,
    /// `false` when no frequency fit the budget and the fallback was used.
    pub feasible: bool,
}

pub struct FrequencySelector<'p> {
    power: &'p PowerModel,
}

impl<'p> FrequencySelector<'p> {
    pub fn new(power: &'p PowerModel) -> Self {
        Self { power }
    }

    /// Run at the fastest frequency for all remaining work.
    pub fn fastest(&self, job: &JobInstance<'_>) -> FrequencyChoice {
        FrequencyChoice {
            frequency: self.power.fastest(),
            duration: job.remaining(),
            feasible: true,
        }
    }

    /// Time needed to finish `job` at `freq`.
    ///
    /// The task's WCET at `freq` scaled by the fraction of work remaining,
    /// rounded up to a whole time unit.  `None` if the task has no WCET for
    /// `freq`.
    pub fn scaled_duration(&self, job: &JobInstance<'_>, freq: Frequency) -> Option<u64> {
        let wcet_max = job.task.wcet_at(self.power.fastest())?;
        let wcet_f = job.task.wcet_at(freq)?;
        if wcet_max == 0 {
            return Some(0);
        }
        let scaled = (u128::from(wcet_f) * u128::from(job.remaining())).div_ceil(u128::from(wcet_max));
        u64::try_from(scaled).ok()
    }

    /// Fastest-frequency work accomplished by running `job` for `duration`
    /// at `freq`, rounded up and capped at the job's remaining work.
    pub fn work_done(&self, job: &JobInstance<'_>, freq: Frequency, duration: u64) -> u64 {
        let fastest = self.power.fastest();
        let (Some(wcet_max), Some(wcet_f)) = (job.task.wcet_at(fastest), job.task.wcet_at(freq)) else {
            return duration.min(job.remaining());
        };
        if freq == fastest || wcet_f == 0 {
            return duration.min(job.remaining());
        }
        let work = (u128::from(duration) * u128::from(wcet_max)).div_ceil(u128::from(wcet_f));
        u64::try_from(work)
            .unwrap_or(u64::MAX)
            .min(job.remaining())
    }

    /// Pick the energy-minimal feasible frequency for `job` within `budget`.
    pub fn select(&self, job: &JobInstance<'_>, budget: u64) -> FrequencyChoice {
        let idle = u128::from(self.power.idle_power_mw());
        let mut best: Option<(u128, FrequencyChoice)> = None;

        // Fastest first, so `<=` lets a slower frequency take an exact tie.
        for &freq in self.power.frequencies() {
            let Some(duration) = self.scaled_duration(job, freq) else {
                continue;
            };
            if duration > budget {
                debug!(task = job.name(), freq = %freq, duration, budget, "infeasible");
                continue;
            }
            let active = u128::from(self.power.active_power_mw(freq));
            let cost = active * u128::from(duration) + idle * u128::from(budget - duration);
            debug!(task = job.name(), freq = %freq, duration, cost_mws = cost as u64, "candidate");

            if best.as_ref().map_or(true, |(best_cost, _)| cost <= *best_cost) {
                best = Some((
                    cost,
                    FrequencyChoice {
                        frequency: freq,
                        duration,
                        feasible: true,
                    },
                ));
            }
        }

        match best {
            Some((_, choice)) => choice,
            None => {
                debug!(task = job.name(), budget, "no feasible frequency, falling back to fastest");
                FrequencyChoice {
                    feasible: false,
                    ..self.fastest(job)
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
