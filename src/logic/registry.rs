// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! In-memory poll registry persisted through [`CsvStore`] on every mutation.
//!
//! Mutations are applied to a copy of the poll list which only replaces the
//! live list once the store accepted it, so memory and disk stay in step even
//! when a write fails.

use log::{debug, info};

use crate::config::PollLimits;
use crate::logic::storage::CsvStore;
use crate::models::{Poll, PollError, PollResult};

/// Ordered collection of polls keyed by name.
#[derive(Debug)]
pub struct PollRegistry {
    store: CsvStore,
    limits: PollLimits,
    polls: Vec<Poll>,
}

impl PollRegistry {
    /// Load all polls from `store`.
    pub fn open(store: CsvStore, limits: PollLimits) -> PollResult<Self> {
        let polls = store.load_all()?;
        Ok(Self {
            store,
            limits,
            polls,
        })
    }

    /// Registry without any polls; the next mutation overwrites the store.
    pub fn empty(store: CsvStore, limits: PollLimits) -> Self {
        Self {
            store,
            limits,
            polls: Vec::new(),
        }
    }

    pub fn polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn limits(&self) -> PollLimits {
        self.limits
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    pub fn get(&self, name: &str) -> PollResult<&Poll> {
        self.position(name)
            .map(|idx| &self.polls[idx])
            .ok_or_else(|| PollError::NotFound(name.to_string()))
    }

    /// Create a poll with zero votes on every choice.
    pub fn create(
        &mut self,
        name: &str,
        description: &str,
        choices: &[String],
    ) -> PollResult<&Poll> {
        let poll = Poll::new(name, description, choices)?;
        self.check_choice_count(&poll)?;
        if self.position(&poll.name).is_some() {
            return Err(PollError::DuplicateName(poll.name));
        }

        let mut next = self.polls.clone();
        next.push(poll);
        self.commit(next)?;

        let created = self.polls.len() - 1;
        info!("Created poll '{}'", self.polls[created].name);
        Ok(&self.polls[created])
    }

    /// Add one vote to `choice` and return its new count.
    pub fn vote(&mut self, name: &str, choice: &str) -> PollResult<u64> {
        let idx = self
            .position(name)
            .ok_or_else(|| PollError::NotFound(name.to_string()))?;
        let poll = &self.polls[idx];
        let slot = poll
            .choices
            .iter()
            .position(|c| c.label == choice)
            .ok_or_else(|| PollError::InvalidChoice {
                poll: name.to_string(),
                choice: choice.to_string(),
            })?;
        let closed = || PollError::PollClosed {
            poll: name.to_string(),
            limit: self.limits.vote_limit,
        };
        if self.is_closed(poll) {
            return Err(closed());
        }
        let votes = poll.choices[slot].votes.checked_add(1).ok_or_else(closed)?;

        let mut next = self.polls.clone();
        next[idx].choices[slot].votes = votes;
        self.commit(next)?;

        debug!("Vote for '{choice}' in '{name}' (now {votes})");
        Ok(votes)
    }

    /// Replace name, description, and choices of an existing poll.
    ///
    /// Choices whose label is kept retain their count; new labels start at
    /// zero. The poll keeps its position in the list.
    pub fn edit(
        &mut self,
        name: &str,
        new_name: &str,
        new_description: &str,
        new_choices: &[String],
    ) -> PollResult<&Poll> {
        let idx = self
            .position(name)
            .ok_or_else(|| PollError::NotFound(name.to_string()))?;

        let mut edited = self.polls[idx].clone();
        edited.name = new_name.trim().to_string();
        edited.description = new_description.trim().to_string();
        edited.replace_choices(new_choices);
        edited.validate()?;
        self.check_choice_count(&edited)?;
        if edited.name != name && self.position(&edited.name).is_some() {
            return Err(PollError::DuplicateName(edited.name));
        }

        let mut next = self.polls.clone();
        next[idx] = edited;
        self.commit(next)?;

        info!("Edited poll '{name}' (now '{}')", self.polls[idx].name);
        Ok(&self.polls[idx])
    }

    /// Remove a poll and return it.
    pub fn delete(&mut self, name: &str) -> PollResult<Poll> {
        let idx = self
            .position(name)
            .ok_or_else(|| PollError::NotFound(name.to_string()))?;

        let mut next = self.polls.clone();
        let removed = next.remove(idx);
        self.commit(next)?;

        info!("Deleted poll '{name}'");
        Ok(removed)
    }

    /// Drop in-memory state and read the store again.
    pub fn reload(&mut self) -> PollResult<()> {
        self.polls = self.store.load_all()?;
        Ok(())
    }

    /// Whether `poll` reached the configured vote limit.
    pub fn is_closed(&self, poll: &Poll) -> bool {
        poll.is_closed(self.limits.vote_limit)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.polls.iter().position(|p| p.name == name)
    }

    fn check_choice_count(&self, poll: &Poll) -> PollResult<()> {
        if poll.choices.len() > self.limits.max_choices {
            return Err(PollError::validation(format!(
                "A poll can have at most {} choices.",
                self.limits.max_choices
            )));
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<Poll>) -> PollResult<()> {
        self.store.save_all(&next)?;
        self.polls = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Choice;
    use tempfile::TempDir;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn registry(tmp: &TempDir) -> PollRegistry {
        let store = CsvStore::new(tmp.path().join("polls.csv"));
        PollRegistry::open(store, PollLimits::default()).unwrap()
    }

    fn lunch(reg: &mut PollRegistry) {
        reg.create("Lunch", "Where do we eat?", &labels(&["Pizza", "Sushi"]))
            .unwrap();
    }

    #[test]
    fn create_then_get_has_zero_counts() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);

        let poll = reg.get("Lunch").unwrap();

        assert_eq!(poll.description, "Where do we eat?");
        assert!(poll.choices.iter().all(|c| c.votes == 0));
        assert_eq!(poll.choices.len(), 2);
    }

    #[test]
    fn create_persists_immediately() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);

        let reopened = registry(&tmp);

        assert_eq!(reopened.polls(), reg.polls());
    }

    #[test]
    fn duplicate_create_fails_and_keeps_existing() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);
        reg.vote("Lunch", "Pizza").unwrap();
        let before = reg.get("Lunch").unwrap().clone();

        let err = reg
            .create("Lunch", "Other", &labels(&["Tacos"]))
            .unwrap_err();

        assert!(matches!(err, PollError::DuplicateName(name) if name == "Lunch"));
        assert_eq!(reg.get("Lunch").unwrap(), &before);
        assert_eq!(reg.polls().len(), 1);
    }

    #[test]
    fn create_rejects_too_many_choices() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);

        let err = reg
            .create("Big", "", &labels(&["A", "B", "C", "D", "E"]))
            .unwrap_err();

        assert!(matches!(err, PollError::Validation(_)));
        assert!(reg.polls().is_empty());
    }

    #[test]
    fn vote_increments_only_the_chosen_choice() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);

        assert_eq!(reg.vote("Lunch", "Pizza").unwrap(), 1);
        assert_eq!(reg.vote("Lunch", "Pizza").unwrap(), 2);

        let poll = reg.get("Lunch").unwrap();
        assert_eq!(poll.choice("Pizza").map(|c| c.votes), Some(2));
        assert_eq!(poll.choice("Sushi").map(|c| c.votes), Some(0));
    }

    #[test]
    fn vote_on_missing_poll_or_choice_fails() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);

        assert!(matches!(
            reg.vote("Dinner", "Pizza"),
            Err(PollError::NotFound(_))
        ));
        assert!(matches!(
            reg.vote("Lunch", "Tacos"),
            Err(PollError::InvalidChoice { .. })
        ));
        assert_eq!(reg.get("Lunch").unwrap().total_votes(), 0);
    }

    #[test]
    fn poll_closes_at_vote_limit() {
        let tmp = TempDir::new().unwrap();
        let store = CsvStore::new(tmp.path().join("polls.csv"));
        let limits = PollLimits {
            vote_limit: 2,
            ..PollLimits::default()
        };
        let mut reg = PollRegistry::open(store, limits).unwrap();
        lunch(&mut reg);

        reg.vote("Lunch", "Pizza").unwrap();
        reg.vote("Lunch", "Sushi").unwrap();
        let err = reg.vote("Lunch", "Pizza").unwrap_err();

        assert!(matches!(err, PollError::PollClosed { limit: 2, .. }));
        assert!(reg.is_closed(reg.get("Lunch").unwrap()));
        assert_eq!(reg.get("Lunch").unwrap().total_votes(), 2);
    }

    #[test]
    fn vote_never_wraps_a_saturated_count() {
        let tmp = TempDir::new().unwrap();
        let store = CsvStore::new(tmp.path().join("polls.csv"));
        let limits = PollLimits {
            vote_limit: u64::MAX,
            ..PollLimits::default()
        };
        let mut reg = PollRegistry::empty(store, limits);
        reg.create("Big", "", &labels(&["A"])).unwrap();
        reg.polls[0].choices[0].votes = u64::MAX;

        assert!(matches!(
            reg.vote("Big", "A"),
            Err(PollError::PollClosed { .. })
        ));
        assert_eq!(reg.get("Big").unwrap().choices[0].votes, u64::MAX);
    }

    #[test]
    fn edit_preserves_counts_for_kept_labels() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);
        reg.vote("Lunch", "Pizza").unwrap();
        reg.vote("Lunch", "Sushi").unwrap();

        reg.edit("Lunch", "Lunch", "Updated", &labels(&["Pizza", "Tacos"]))
            .unwrap();

        let poll = reg.get("Lunch").unwrap();
        assert_eq!(poll.description, "Updated");
        assert_eq!(
            poll.choices,
            vec![Choice::with_votes("Pizza", 1), Choice::with_votes("Tacos", 0)]
        );
        assert_eq!(registry(&tmp).get("Lunch").unwrap(), poll);
    }

    #[test]
    fn edit_can_rename_but_not_onto_another_poll() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);
        reg.create("Dinner", "", &labels(&["Soup"])).unwrap();

        let err = reg
            .edit("Lunch", "Dinner", "", &labels(&["Pizza"]))
            .unwrap_err();
        assert!(matches!(err, PollError::DuplicateName(_)));

        reg.edit("Lunch", "Brunch", "", &labels(&["Pizza", "Sushi"]))
            .unwrap();
        let names: Vec<_> = reg.polls().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Brunch", "Dinner"]);
        assert!(matches!(reg.get("Lunch"), Err(PollError::NotFound(_))));
    }

    #[test]
    fn edit_rejects_invalid_choices_without_touching_state() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);
        let before = reg.polls().to_vec();

        assert!(reg.edit("Lunch", "Lunch", "", &[]).is_err());
        assert!(reg
            .edit("Lunch", "Lunch", "", &labels(&["Pizza", "Pizza"]))
            .is_err());
        assert!(matches!(
            reg.edit("Nope", "Nope", "", &labels(&["A"])),
            Err(PollError::NotFound(_))
        ));
        assert_eq!(reg.polls(), before.as_slice());
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let mut reg = registry(&tmp);
        lunch(&mut reg);

        let removed = reg.delete("Lunch").unwrap();

        assert_eq!(removed.name, "Lunch");
        assert!(matches!(reg.get("Lunch"), Err(PollError::NotFound(_))));
        assert!(matches!(reg.delete("Lunch"), Err(PollError::NotFound(_))));
        assert!(registry(&tmp).polls().is_empty());
    }

    #[test]
    fn failed_save_leaves_memory_untouched() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be makes every write fail.
        let path = tmp.path().join("polls.csv");
        std::fs::create_dir(&path).unwrap();
        let mut reg = PollRegistry::empty(CsvStore::new(&path), PollLimits::default());

        let result = reg.create("Lunch", "", &labels(&["Pizza"]));

        assert!(result.is_err());
        assert!(reg.polls().is_empty());
    }

    #[test]
    fn round_trip_is_independent_of_row_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("polls.csv");
        std::fs::write(&path, "B,second,X,4\nA,first,Y,1,Z,2\n").unwrap();
        let store = CsvStore::new(&path);
        let original = store.load_all().unwrap();

        let mut reversed = original.clone();
        reversed.reverse();
        store.save_all(&reversed).unwrap();
        let mut reg = PollRegistry::open(store, PollLimits::default()).unwrap();
        reg.reload().unwrap();

        for poll in &original {
            assert_eq!(reg.get(&poll.name).unwrap(), poll);
        }
        assert_eq!(reg.polls().len(), original.len());
    }
}
