// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Poll domain model and invariant checks (UI-agnostic).

use std::collections::HashSet;

use super::error::{PollError, PollResult};

/// One votable option inside a poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub votes: u64,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            votes: 0,
        }
    }

    pub fn with_votes(label: impl Into<String>, votes: u64) -> Self {
        Self {
            label: label.into(),
            votes,
        }
    }
}

/// A named poll with an ordered list of choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poll {
    pub name: String,
    pub description: String,
    pub choices: Vec<Choice>,
}

impl Poll {
    /// Build a fresh poll with zero votes, validating name and labels.
    ///
    /// Name, description, and labels are trimmed before validation.
    pub fn new(name: &str, description: &str, labels: &[String]) -> PollResult<Self> {
        let poll = Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            choices: labels.iter().map(|l| Choice::new(l.trim())).collect(),
        };
        poll.validate()?;
        Ok(poll)
    }

    /// Check the poll invariants: non-empty name, at least one choice,
    /// non-empty and unique labels.
    pub fn validate(&self) -> PollResult<()> {
        if self.name.trim().is_empty() {
            return Err(PollError::validation("Poll name cannot be empty."));
        }
        if self.choices.is_empty() {
            return Err(PollError::validation("A poll needs at least one choice."));
        }
        let mut seen = HashSet::new();
        for choice in &self.choices {
            if choice.label.trim().is_empty() {
                return Err(PollError::validation("Choices cannot be empty."));
            }
            if !seen.insert(choice.label.as_str()) {
                return Err(PollError::validation(format!(
                    "Duplicate choice '{}'.",
                    choice.label
                )));
            }
        }
        Ok(())
    }

    pub fn choice(&self, label: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == label)
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total_votes(&self) -> u64 {
        self.choices
            .iter()
            .fold(0u64, |total, c| total.saturating_add(c.votes))
    }

    /// Whether the poll reached `vote_limit` and accepts no more votes.
    pub fn is_closed(&self, vote_limit: u64) -> bool {
        self.total_votes() >= vote_limit
    }

    /// Fraction of all votes that went to `label`, `0.0` when nothing was cast.
    pub fn share(&self, label: &str) -> f32 {
        let total = self.total_votes();
        match self.choice(label) {
            Some(choice) if total > 0 => choice.votes as f32 / total as f32,
            _ => 0.0,
        }
    }

    /// Replace the choice list, carrying over counts for labels that survive.
    pub(crate) fn replace_choices(&mut self, labels: &[String]) {
        let previous = std::mem::take(&mut self.choices);
        self.choices = labels
            .iter()
            .map(|label| {
                let label = label.trim();
                let votes = previous
                    .iter()
                    .find(|c| c.label == label)
                    .map(|c| c.votes)
                    .unwrap_or(0);
                Choice::with_votes(label, votes)
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_poll_trims_and_starts_at_zero() {
        let poll = Poll::new("  Lunch ", " Where? ", &labels(&[" Pizza", "Sushi "])).unwrap();

        assert_eq!(poll.name, "Lunch");
        assert_eq!(poll.description, "Where?");
        assert_eq!(poll.choices, vec![Choice::new("Pizza"), Choice::new("Sushi")]);
        assert_eq!(poll.total_votes(), 0);
    }

    #[test]
    fn new_poll_rejects_duplicate_labels() {
        let err = Poll::new("Lunch", "", &labels(&["Pizza", " Pizza"])).unwrap_err();
        assert!(matches!(err, PollError::Validation(msg) if msg.contains("Duplicate")));
    }

    #[test]
    fn new_poll_rejects_empty_name_and_missing_choices() {
        assert!(matches!(
            Poll::new("   ", "", &labels(&["A"])),
            Err(PollError::Validation(_))
        ));
        assert!(matches!(
            Poll::new("Empty", "", &[]),
            Err(PollError::Validation(_))
        ));
        assert!(matches!(
            Poll::new("Blank", "", &labels(&["A", " "])),
            Err(PollError::Validation(_))
        ));
    }

    #[test]
    fn replace_choices_keeps_counts_of_surviving_labels() {
        let mut poll = Poll {
            name: "Lunch".into(),
            description: String::new(),
            choices: vec![Choice::with_votes("Pizza", 3), Choice::with_votes("Sushi", 1)],
        };

        poll.replace_choices(&labels(&["Tacos", "Pizza"]));

        assert_eq!(
            poll.choices,
            vec![Choice::with_votes("Tacos", 0), Choice::with_votes("Pizza", 3)]
        );
    }

    #[test]
    fn share_is_zero_without_votes() {
        let mut poll = Poll::new("Lunch", "", &labels(&["Pizza", "Sushi"])).unwrap();
        assert_eq!(poll.share("Pizza"), 0.0);

        poll.choices[0].votes = 3;
        poll.choices[1].votes = 1;
        assert!((poll.share("Pizza") - 0.75).abs() < f32::EPSILON);
        assert_eq!(poll.share("Missing"), 0.0);
    }

    #[test]
    fn huge_counts_saturate_and_close_the_poll() {
        let poll = Poll {
            name: "Big".into(),
            description: String::new(),
            choices: vec![Choice::with_votes("A", u64::MAX), Choice::with_votes("B", 1)],
        };

        assert_eq!(poll.total_votes(), u64::MAX);
        assert!(poll.is_closed(100));
        assert!(!Poll::new("Fresh", "", &labels(&["A"])).unwrap().is_closed(100));
    }
}
