/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Utilisation-based schedulability check, run before the simulation.
//!
//! The result is a **warning only**: an overloaded task set is still
//! simulated, and the trace shows where deadlines slip.
//!
//! # Bounds
//! * **EDF** – a set of implicit-deadline periodic tasks is schedulable on one
//!   processor iff `U ≤ 1`.
//! * **RM** – Liu & Layland (1973): schedulable if
//!   `U ≤ n (2^{1/n} − 1)`.  The bound converges to `ln 2 ≈ 0.693`; between
//!   it and `1.0` the set may or may not be schedulable.
//!
//! | n | RM bound |
//! |---|---|
//! | 1 | 1.000 |
//! | 2 | 0.828 |
//! | 3 | 0.780 |
//! | ∞ | 0.693 |
//!
//! Utilisation is measured at the fastest frequency, the best case for every
//! task.

use tracing::{info, warn};

use super::Policy;
use crate::power::Frequency;
use crate::task::Task;

/// `n (2^{1/n} − 1)`; `0.0` for `n = 0`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// Utilisation bound for `n` tasks under `policy`.
pub fn policy_bound(policy: Policy, n: usize) -> f64 {
    match policy {
        Policy::Edf => 1.0,
        Policy::Rm => liu_layland_bound(n),
    }
}

/// Total utilisation `Σ wcet(freq) / period`.
pub fn total_utilization(tasks: &[Task], freq: Frequency) -> f64 {
    tasks.iter().map(|t| t.utilization_at(freq)).sum()
}

/// Returns `Some(U)` when the utilisation at `fastest` exceeds the policy
/// bound, `None` when the set passes.
pub fn check_utilization(policy: Policy, tasks: &[Task], fastest: Frequency) -> Option<f64> {
    if tasks.is_empty() {
        return None;
    }
    let u = total_utilization(tasks, fastest);
    (u > policy_bound(policy, tasks.len())).then_some(u)
}

/// Log the utilisation check result.
pub fn log_utilization(policy: Policy, tasks: &[Task], fastest: Frequency) {
    let bound = policy_bound(policy, tasks.len());
    match check_utilization(policy, tasks, fastest) {
        Some(u) => warn!(
            %policy,
            utilization = u,
            bound,
            task_count = tasks.len(),
            "task set may not be schedulable (utilization exceeds bound), expect deadline misses"
        ),
        None => info!(
            %policy,
            utilization = total_utilization(tasks, fastest),
            bound,
            "utilization within schedulability bound"
        ),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
