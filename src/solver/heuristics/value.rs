//! Heuristics for ordering a slot's candidate words.

use std::cell::RefCell;

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    puzzle::{Puzzle, SlotId, Word},
    solver::{consistency::overlap_matches, domains::DomainStore, search::Assignment},
};

/// A strategy for deciding which candidate words to try first.
pub trait ValueOrdering {
    /// The slot's current candidates, in the order they should be tried.
    fn order_words(
        &self,
        slot: SlotId,
        puzzle: &Puzzle,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Vec<Word>;
}

/// Plain sorted order. Deterministic and cheap; makes no attempt to be
/// clever about the neighbors.
pub struct Lexicographic;

impl ValueOrdering for Lexicographic {
    fn order_words(
        &self,
        slot: SlotId,
        _puzzle: &Puzzle,
        domains: &DomainStore,
        _assignment: &Assignment,
    ) -> Vec<Word> {
        let mut words: Vec<Word> = domains.get(slot).iter().cloned().collect();
        words.sort();
        words
    }
}

/// Least-constraining-value ordering.
///
/// Each candidate is scored by how many words it would eliminate from the
/// domains of unassigned neighbors — the values that disagree with it at the
/// overlap — and candidates are tried in ascending score order, so the least
/// disruptive choice comes first. Ties are lexicographic, or reproducibly
/// shuffled when the heuristic was built with [`LeastConstrainingValue::seeded`].
pub struct LeastConstrainingValue {
    rng: Option<RefCell<ChaCha8Rng>>,
}

impl LeastConstrainingValue {
    pub fn new() -> Self {
        Self { rng: None }
    }

    /// Breaks score ties in a seeded random order instead of
    /// lexicographically, for variety across runs with the same inputs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(RefCell::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    fn eliminated(
        puzzle: &Puzzle,
        domains: &DomainStore,
        assignment: &Assignment,
        slot: SlotId,
        word: &Word,
    ) -> usize {
        puzzle
            .neighbors(slot)
            .iter()
            .filter(|&&neighbor| !assignment.contains(neighbor))
            .map(|&neighbor| {
                let Some((i, j)) = puzzle.overlap(slot, neighbor) else {
                    return 0;
                };
                domains
                    .get(neighbor)
                    .iter()
                    .filter(|candidate| !overlap_matches(word, i, candidate, j))
                    .count()
            })
            .sum()
    }
}

impl Default for LeastConstrainingValue {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueOrdering for LeastConstrainingValue {
    fn order_words(
        &self,
        slot: SlotId,
        puzzle: &Puzzle,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Vec<Word> {
        let mut words: Vec<Word> = domains.get(slot).iter().cloned().collect();
        match &self.rng {
            Some(rng) => words.shuffle(&mut *rng.borrow_mut()),
            None => words.sort(),
        }

        let mut scored: Vec<(usize, Word)> = words
            .into_iter()
            .map(|word| {
                let score = Self::eliminated(puzzle, domains, assignment, slot, &word);
                (score, word)
            })
            .collect();
        // Stable sort: the tie order established above survives.
        scored.sort_by(|a, b| a.0.cmp(&b.0));
        scored.into_iter().map(|(_, word)| word).collect()
    }
}
