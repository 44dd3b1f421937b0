// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! CSV-backed persistence for polls.
//!
//! Layout: no header, one row per poll:
//! `name, description, label1, count1, label2, count2, ...`.
//! Rows may differ in length; fields use standard CSV quoting.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info, warn};

use crate::models::{Choice, Poll, PollError, PollResult};

/// Reads and rewrites the poll file wholesale.
#[derive(Clone, Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every well-formed poll from the file.
    ///
    /// A missing file yields an empty list. Malformed rows and rows repeating
    /// an earlier poll name are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened or its CSV framing is
    /// broken (for example invalid UTF-8).
    pub fn load_all(&self) -> PollResult<Vec<Poll>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No poll file at {:?} yet; starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(err) => return Err(PollError::io(&self.path, err)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut polls = Vec::new();
        let mut names = HashSet::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(idx as u64 + 1);

            let poll = match parse_row(&record, line) {
                Ok(poll) => poll,
                Err(err) => {
                    warn!("Skipping row: {err}");
                    continue;
                }
            };
            if !names.insert(poll.name.clone()) {
                warn!(
                    "Skipping row on line {line}: poll '{}' already loaded",
                    poll.name
                );
                continue;
            }
            polls.push(poll);
        }

        info!("Loaded {} poll(s) from {:?}", polls.len(), self.path);
        Ok(polls)
    }

    /// Overwrite the file with `polls`, in order.
    ///
    /// Parent directories are created if missing. There is no atomic rename;
    /// a crash mid-write can leave a truncated file.
    pub fn save_all(&self, polls: &[Poll]) -> PollResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| PollError::io(parent, err))?;
        }

        let file = File::create(&self.path).map_err(|err| PollError::io(&self.path, err))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        for poll in polls {
            writer.write_record(to_row(poll))?;
        }
        writer
            .flush()
            .map_err(|err| PollError::io(&self.path, err))?;

        debug!("Saved {} poll(s) to {:?}", polls.len(), self.path);
        Ok(())
    }
}

/// Turn one stored row into a poll, reporting why it was rejected.
pub fn parse_row(record: &StringRecord, line: u64) -> PollResult<Poll> {
    let malformed = |reason: String| PollError::Parse { line, reason };

    if record.len() < 4 {
        return Err(malformed(format!(
            "expected name, description and at least one choice, found {} field(s)",
            record.len()
        )));
    }
    if !record.len().is_multiple_of(2) {
        return Err(malformed("choice without a vote count".into()));
    }

    let fields: Vec<&str> = record.iter().collect();
    let mut choices = Vec::with_capacity((fields.len() - 2) / 2);
    let mut total: u64 = 0;
    for pair in fields[2..].chunks(2) {
        let (label, count) = (pair[0].trim(), pair[1].trim());
        let votes = count.parse::<u64>().map_err(|_| {
            malformed(format!("invalid vote count '{count}' for choice '{label}'"))
        })?;
        total = total
            .checked_add(votes)
            .ok_or_else(|| malformed("vote counts add up past the maximum".into()))?;
        choices.push(Choice::with_votes(label, votes));
    }

    let poll = Poll {
        name: fields[0].trim().to_string(),
        description: fields[1].to_string(),
        choices,
    };
    poll.validate().map_err(|err| malformed(err.to_string()))?;
    Ok(poll)
}

fn to_row(poll: &Poll) -> Vec<String> {
    let mut row = Vec::with_capacity(2 + poll.choices.len() * 2);
    row.push(poll.name.clone());
    row.push(poll.description.clone());
    for choice in &poll.choices {
        row.push(choice.label.clone());
        row.push(choice.votes.to_string());
    }
    row
}
