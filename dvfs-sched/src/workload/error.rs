/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for workload input parsing.
//!
//! Every variant names the offending line (1-based) and, where relevant, the
//! field, so the message printed by the binary points straight at the
//! problem.  Nothing is ever defaulted: a malformed file fails the run before
//! any simulation happens.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkloadError {
    /// The input file could not be read.
    #[error("cannot read workload file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input contained no header line.
    #[error("workload input is empty, expected a header line")]
    Empty,

    /// A numeric field did not parse as an unsigned integer.
    #[error("line {line}: field '{field}' must be a non-negative integer, got '{value}'")]
    InvalidNumber {
        line: usize,
        field: String,
        value: String,
    },

    /// A line carried the wrong number of whitespace-separated fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The number of task lines disagrees with the header's task count.
    #[error("header declares {declared} task(s) but {found} task line(s) follow")]
    TaskCountMismatch { declared: usize, found: usize },

    /// Two task lines share a name.
    #[error("line {line}: duplicate task name '{name}'")]
    DuplicateTask { line: usize, name: String },

    /// A task's period is zero.
    #[error("line {line}: task '{name}' has a zero period")]
    ZeroPeriod { line: usize, name: String },

    /// A task's WCET at some frequency is zero.
    #[error("line {line}: task '{name}' has a zero WCET at {freq_mhz} MHz")]
    ZeroWcet {
        line: usize,
        name: String,
        freq_mhz: u32,
    },
}
