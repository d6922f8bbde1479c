use im::HashSet;

use crate::puzzle::{Puzzle, SlotId, Vocabulary, Word};

/// The candidate-word set of every slot, keyed by [`SlotId`].
///
/// Domains only ever shrink while the solver runs; the search driver rolls
/// them back through [`DomainStore::snapshot`] and [`DomainStore::restore`].
/// The persistent sets make a snapshot a cheap structural-sharing clone
/// while still giving it value semantics: mutating the store after taking a
/// snapshot never changes what `restore` brings back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: Vec<HashSet<Word>>,
}

/// A point-in-time copy of every domain.
#[derive(Debug, Clone)]
pub struct DomainSnapshot {
    domains: Vec<HashSet<Word>>,
}

impl DomainStore {
    /// Gives every slot the full vocabulary as its initial domain.
    pub fn new(puzzle: &Puzzle, vocabulary: &Vocabulary) -> Self {
        let all: HashSet<Word> = vocabulary.words().iter().cloned().collect();
        Self {
            domains: vec![all; puzzle.slot_count()],
        }
    }

    pub fn get(&self, slot: SlotId) -> &HashSet<Word> {
        &self.domains[slot]
    }

    pub fn len(&self, slot: SlotId) -> usize {
        self.domains[slot].len()
    }

    pub fn is_empty(&self, slot: SlotId) -> bool {
        self.domains[slot].is_empty()
    }

    /// Removes the given words from a slot's domain. Returns whether the
    /// domain changed.
    pub fn shrink(&mut self, slot: SlotId, words: &[Word]) -> bool {
        let before = self.domains[slot].len();
        for word in words {
            self.domains[slot].remove(word);
        }
        self.domains[slot].len() < before
    }

    /// Narrows a slot's domain to a single word.
    pub fn assign(&mut self, slot: SlotId, word: Word) {
        self.domains[slot] = HashSet::unit(word);
    }

    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot {
            domains: self.domains.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &DomainSnapshot) {
        self.domains = snapshot.domains.clone();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> DomainStore {
        let puzzle = Puzzle::parse("#_#\n___\n#_#").unwrap();
        let vocabulary = Vocabulary::from_words(["cat", "car", "dog"]);
        DomainStore::new(&puzzle, &vocabulary)
    }

    fn word(s: &str) -> Word {
        s.into()
    }

    #[test]
    fn every_slot_starts_with_the_full_vocabulary() {
        let store = store();
        assert_eq!(store.len(0), 3);
        assert_eq!(store.get(0), store.get(1));
    }

    #[test]
    fn shrink_reports_whether_anything_was_removed() {
        let mut store = store();
        assert!(store.shrink(0, &[word("CAT")]));
        assert_eq!(store.len(0), 2);
        assert!(!store.shrink(0, &[word("MISSING")]));
        assert_eq!(store.len(0), 2);
    }

    #[test]
    fn assign_narrows_to_a_singleton() {
        let mut store = store();
        store.assign(1, word("DOG"));
        assert_eq!(store.len(1), 1);
        assert!(store.get(1).contains(&word("DOG")));
    }

    #[test]
    fn snapshots_are_isolated_from_later_mutations() {
        let mut store = store();
        let snapshot = store.snapshot();
        let original = store.clone();

        store.shrink(0, &[word("CAT"), word("DOG")]);
        store.assign(1, word("CAR"));
        assert_ne!(store, original);

        store.restore(&snapshot);
        assert_eq!(store, original);
    }

    #[test]
    fn a_snapshot_can_be_restored_more_than_once() {
        let mut store = store();
        let snapshot = store.snapshot();
        let original = store.clone();

        store.shrink(0, &[word("CAT")]);
        store.restore(&snapshot);
        store.shrink(0, &[word("DOG")]);
        store.restore(&snapshot);
        assert_eq!(store, original);
    }
}
