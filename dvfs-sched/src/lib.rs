/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! dvfs-sched – single-processor EDF / RM scheduling simulator with
//! DVFS energy minimisation.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task            – Task catalog entry and JobInstance
//! ├── power           – frequencies, power model, energy arithmetic
//! ├── config/         – YAML frequency profile
//! ├── workload/       – input text format parser + WorkloadError
//! ├── hyperperiod/    – LCM / GCD helpers
//! ├── scheduler/      – dispatch loop, ready set, frequency selector,
//! │                     utilisation bounds
//! ├── trace           – schedule entries and deadline-miss records
//! └── report          – summary block over a finished trace
//! ```

pub mod config;
pub mod hyperperiod;
pub mod power;
pub mod report;
pub mod scheduler;
pub mod task;
pub mod trace;
pub mod workload;
