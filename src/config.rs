// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Startup configuration: where polls live and how large they may grow.

use std::path::PathBuf;

/// File name of the poll store inside the application data directory.
const DATA_FILE_NAME: &str = "polls.csv";
const APP_DIR_NAME: &str = "bunnypoll";

/// Limits applied when polls are created, edited, or voted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollLimits {
    /// Choice fields the form starts with and requires.
    pub min_choices: usize,
    /// Upper bound on choices per poll.
    pub max_choices: usize,
    /// Total votes after which a poll stops accepting new ones.
    pub vote_limit: u64,
}

impl Default for PollLimits {
    fn default() -> Self {
        Self {
            min_choices: 2,
            max_choices: 4,
            vote_limit: 100,
        }
    }
}

/// Settings resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub limits: PollLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            limits: PollLimits::default(),
        }
    }
}

/// `<platform data dir>/bunnypoll/polls.csv`, or `./polls.csv` when the
/// platform has no data directory.
fn default_data_file() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR_NAME).join(DATA_FILE_NAME),
        None => PathBuf::from(DATA_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_file_is_named_polls_csv() {
        let config = AppConfig::default();
        assert_eq!(
            config.data_file.file_name().and_then(|n| n.to_str()),
            Some("polls.csv")
        );
    }

    #[test]
    fn default_limits_allow_two_to_four_choices() {
        let limits = PollLimits::default();
        assert_eq!((limits.min_choices, limits.max_choices), (2, 4));
        assert_eq!(limits.vote_limit, 100);
    }
}
