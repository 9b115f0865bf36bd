/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use dvfs_sched::config::ProfileManager;
use dvfs_sched::hyperperiod::log_horizon_alignment;
use dvfs_sched::report::Report;
use dvfs_sched::scheduler::feasibility::log_utilization;
use dvfs_sched::scheduler::{Policy, Simulator};
use dvfs_sched::workload::Workload;

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Earliest-Deadline-First
    #[value(name = "EDF")]
    Edf,
    /// Rate-Monotonic
    #[value(name = "RM")]
    Rm,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Edf => Policy::Edf,
            PolicyArg::Rm => Policy::Rm,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EnergyFlag {
    /// Energy-efficient mode: pick the cheapest feasible frequency per slice
    #[value(name = "EE")]
    Ee,
}

/// Single-processor EDF / RM scheduling simulator with DVFS.
///
/// Example:
///   dvfs-sched input.txt EDF EE
///   dvfs-sched input.txt RM --profile profiles/reference.yaml
#[derive(Debug, Parser)]
#[command(
    name = "dvfs-sched",
    about = "Single-processor EDF/RM scheduling simulator with DVFS energy minimisation",
    long_about = None,
)]
struct Cli {
    /// Workload file: header line, then one line per task.
    input: PathBuf,

    /// Scheduling policy.
    #[arg(value_enum)]
    policy: PolicyArg,

    /// Pass `EE` to enable DVFS frequency selection.  Any other third token
    /// is rejected as a usage error rather than read as "DVFS off".
    #[arg(value_enum)]
    energy: Option<EnergyFlag>,

    /// Path to a YAML frequency profile (defaults to 1188/918/648/384 MHz).
    #[arg(short = 'c', long = "profile")]
    profile: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // stdout carries only the schedule, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = Policy::from(cli.policy);
    let dvfs = cli.energy.is_some();

    info!(
        input   = %cli.input.display(),
        %policy,
        dvfs,
        profile = ?cli.profile,
        "Configuration"
    );

    // ── Load frequency profile ────────────────────────────────────────────────
    let mut profile_manager = ProfileManager::new();

    match &cli.profile {
        Some(path) => {
            if let Err(e) = profile_manager.load_from_file(path) {
                error!("Failed to load frequency profile: {:#}", e);
                process::exit(1);
            }
        }
        None => {
            info!("No frequency profile provided, using the reference frequencies");
        }
    }

    // ── Load workload ─────────────────────────────────────────────────────────
    let workload = match Workload::load(&cli.input, profile_manager.profile()) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to load workload: {}", e);
            process::exit(1);
        }
    };

    if workload.tasks.is_empty() {
        warn!("Workload has no tasks; the processor idles for the whole horizon");
    }

    // ── Pre-run analysis (warnings only) ─────────────────────────────────────
    log_utilization(policy, &workload.tasks, workload.power.fastest());
    log_horizon_alignment(&workload.tasks, workload.horizon);

    // ── Simulate and report ───────────────────────────────────────────────────
    let trace = Simulator::new(&workload, policy, dvfs).run();
    let report = Report::from_trace(&trace, &workload.power);

    print!("{trace}{report}");
}
