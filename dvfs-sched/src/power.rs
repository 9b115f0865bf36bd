/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Processor power model and energy arithmetic.
//!
//! Units used throughout the crate:
//!
//! | Quantity | Unit |
//! |---|---|
//! | Time | seconds (integer) |
//! | Power | milliwatts (integer) |
//! | Energy | joules (`f64`, `power × time / 1000`) |

use std::collections::BTreeMap;
use std::fmt;

// ── Constants ─────────────────────────────────────────────────────────────────

/// mW·s → J.
pub const ENERGY_UNIT_DIVISOR: f64 = 1_000.0;

/// Suffix printed after every energy value.
pub const ENERGY_UNIT_SUFFIX: &str = "J";

// ── Frequency ─────────────────────────────────────────────────────────────────

/// A processor operating frequency in MHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(pub u32);

impl Frequency {
    pub fn mhz(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Energy in joules for `duration` seconds at `power_mw` milliwatts.
pub fn energy_joules(power_mw: u64, duration: u64) -> f64 {
    (power_mw as f64 * duration as f64) / ENERGY_UNIT_DIVISOR
}

// ── PowerModel ────────────────────────────────────────────────────────────────

/// Immutable description of the processor's power draw.
///
/// Frequencies are kept fastest first; every frequency in the list has an
/// active-power entry.  Power values are unsigned, so non-negativity holds by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerModel {
    frequencies: Vec<Frequency>,
    active_power_mw: BTreeMap<Frequency, u64>,
    idle_power_mw: u64,
}

impl PowerModel {
    /// Build a model from `(frequency, active power)` pairs and the idle power.
    ///
    /// The pairs are re-ordered fastest first.  Returns `None` when `active`
    /// is empty.
    pub fn new(active: Vec<(Frequency, u64)>, idle_power_mw: u64) -> Option<Self> {
        if active.is_empty() {
            return None;
        }
        let mut frequencies: Vec<Frequency> = active.iter().map(|(f, _)| *f).collect();
        frequencies.sort_unstable_by(|a, b| b.cmp(a));
        frequencies.dedup();

        Some(Self {
            frequencies,
            active_power_mw: active.into_iter().collect(),
            idle_power_mw,
        })
    }

    /// Frequencies, fastest first.
    pub fn frequencies(&self) -> &[Frequency] {
        &self.frequencies
    }

    /// The fastest frequency – the unit in which remaining work is tracked.
    pub fn fastest(&self) -> Frequency {
        // Non-empty by construction.
        self.frequencies[0]
    }

    /// Active power at `freq`, or `0` for a frequency this model does not know.
    pub fn active_power_mw(&self, freq: Frequency) -> u64 {
        self.active_power_mw.get(&freq).copied().unwrap_or(0)
    }

    pub fn idle_power_mw(&self) -> u64 {
        self.idle_power_mw
    }

    /// Energy of running at `freq` for `duration` seconds.
    pub fn active_energy(&self, freq: Frequency, duration: u64) -> f64 {
        energy_joules(self.active_power_mw(freq), duration)
    }

    /// Energy of idling for `duration` seconds.
    pub fn idle_energy(&self, duration: u64) -> f64 {
        energy_joules(self.idle_power_mw, duration)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
