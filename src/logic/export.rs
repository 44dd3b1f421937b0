// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Plain-text tally reports for a single poll.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::models::Poll;
use crate::utils::sanitize_component;

/// Suggest a safe report filename from a poll name.
///
/// Uses [`crate::utils::sanitize_component()`] for the base name and appends
/// `.txt`.
pub fn suggested_export_name(poll_name: &str) -> String {
    format!("{}.txt", sanitize_component(poll_name))
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Render the human-readable report for `poll`.
///
/// ```text
/// Name: Lunch
/// Description: Where do we eat?
///
/// Pizza - 2
/// Sushi - 1
///
/// Total votes: 3
/// Exported: 2026-10-16T12:00:00Z
/// ```
pub fn render_report(poll: &Poll, exported_at: OffsetDateTime) -> Result<String> {
    let timestamp = exported_at
        .format(&Rfc3339)
        .context("Failed to format export timestamp")?;

    let mut out = String::new();
    writeln!(out, "Name: {}", poll.name)?;
    writeln!(out, "Description: {}", poll.description)?;
    writeln!(out)?;
    for choice in &poll.choices {
        writeln!(out, "{} - {}", choice.label, choice.votes)?;
    }
    writeln!(out)?;
    writeln!(out, "Total votes: {}", poll.total_votes())?;
    writeln!(out, "Exported: {timestamp}")?;
    Ok(out)
}

/// Write the tally report for `poll` to `destination`, creating parent
/// directories as needed.
pub fn export(poll: &Poll, destination: &Path) -> Result<()> {
    let report = render_report(poll, OffsetDateTime::now_utc())?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export directory: {:?}", parent))?;
    }
    fs::write(destination, report)
        .with_context(|| format!("Failed to write report: {:?}", destination))?;

    info!("Exported poll '{}' to {:?}", poll.name, destination);
    Ok(())
}
