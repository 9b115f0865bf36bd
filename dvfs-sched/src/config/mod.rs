/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Frequency profile loading.
//!
//! A profile names the processor's discrete operating frequencies.  Input
//! files list power values and WCETs positionally, so the profile decides how
//! many columns each line carries and which frequency each column means.
//!
//! The expected YAML structure is:
//! ```yaml
//! name: "reference"
//! frequencies_mhz: [1188, 918, 648, 384]
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::power::Frequency;

/// Frequencies of the reference processor, fastest first.
pub const REFERENCE_FREQUENCIES_MHZ: [u32; 4] = [1188, 918, 648, 384];

// ── Private YAML deserialization types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    name: Option<String>,
    frequencies_mhz: Vec<u32>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Ordered list of operating frequencies, fastest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyProfile {
    pub name: String,
    frequencies: Vec<Frequency>,
}

impl FrequencyProfile {
    /// The four-frequency reference profile.
    pub fn reference() -> Self {
        Self {
            name: String::from("reference"),
            frequencies: REFERENCE_FREQUENCIES_MHZ.iter().map(|&f| Frequency(f)).collect(),
        }
    }

    /// Build a profile, checking that the list is non-empty, free of zeros and
    /// strictly descending.
    pub fn new(name: impl Into<String>, frequencies_mhz: &[u32]) -> Result<Self> {
        if frequencies_mhz.is_empty() {
            bail!("frequency profile must list at least one frequency");
        }
        if frequencies_mhz.contains(&0) {
            bail!("frequency profile contains a zero frequency");
        }
        if let Some(pair) = frequencies_mhz.windows(2).find(|w| w[0] <= w[1]) {
            bail!(
                "frequencies must be strictly descending (fastest first): {} is followed by {}",
                pair[0],
                pair[1]
            );
        }
        Ok(Self {
            name: name.into(),
            frequencies: frequencies_mhz.iter().map(|&f| Frequency(f)).collect(),
        })
    }

    /// Frequencies, fastest first.
    pub fn frequencies(&self) -> &[Frequency] {
        &self.frequencies
    }

    /// Number of per-frequency columns each input line carries.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl Default for FrequencyProfile {
    fn default() -> Self {
        Self::reference()
    }
}

// ── ProfileManager ────────────────────────────────────────────────────────────

/// Holds the active frequency profile, optionally loaded from a YAML file.
#[derive(Debug, Default)]
pub struct ProfileManager {
    profile: FrequencyProfile,

    /// Set to `true` after a successful [`load_from_file`](Self::load_from_file).
    loaded: bool,
}

impl ProfileManager {
    /// Creates a manager holding the reference profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path` and replaces the active profile.
    ///
    /// A profile without a `name` is named after the file stem.  On error the
    /// reference profile is restored.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is structurally
    /// invalid, or the frequency list fails validation.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading frequency profile from: {}", path.display());

        self.profile = FrequencyProfile::reference();
        self.loaded = false;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open profile file: {}", path.display()))?;

        let file: ProfileFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let name = file.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        debug!(name = %name, frequencies = ?file.frequencies_mhz, "profile parsed");

        self.profile = FrequencyProfile::new(name, &file.frequencies_mhz)
            .with_context(|| format!("Invalid frequency profile: {}", path.display()))?;
        self.loaded = true;

        info!(
            name = %self.profile.name,
            count = self.profile.len(),
            "Frequency profile loaded"
        );
        Ok(())
    }

    pub fn profile(&self) -> &FrequencyProfile {
        &self.profile
    }

    /// Returns `true` after a successful [`load_from_file`](Self::load_from_file).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
