/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Result CSV serialisation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use skyward_scheduler::scheduler::SchedulingResult;

/// Writes one CSV row per result to `path`.
///
/// The header row equals the result's field names in declaration order;
/// unset optional fields become empty cells. The parent directory is
/// created if needed and the file content is swapped in atomically, so a
/// crashing experiment never leaves a half-written results file behind.
pub fn write_results_to_csv(path: &Path, results: &[SchedulingResult]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create results directory: {}", dir.display()))?;
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in results {
        writer
            .serialize(result)
            .with_context(|| format!("Cannot serialise result for task '{}'", result.task))?;
    }
    let data = writer
        .into_inner()
        .context("Cannot flush CSV writer buffer")?;

    let tmp = path.with_extension("csv.tmp");
    fs::write(&tmp, data)
        .with_context(|| format!("Cannot write results file: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Cannot move results file into place: {}", path.display()))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
