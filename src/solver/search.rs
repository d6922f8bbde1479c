use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    puzzle::{Puzzle, SlotId, Vocabulary, Word},
    solver::{
        consistency::{ac3, all_arcs, enforce_node_consistency, overlap_matches},
        domains::{DomainSnapshot, DomainStore},
        heuristics::{
            LeastConstrainingValue, MinimumRemainingValues, SlotSelection, ValueOrdering,
        },
        stats::SearchStats,
    },
};

/// A partial mapping from slots to words, grown and shrunk by the search.
///
/// While it grows, the assigned words stay pairwise distinct and every
/// assigned crossing pair agrees at its overlap; the driver checks both
/// before committing each extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    words: Vec<Option<Word>>,
    assigned: usize,
}

impl Assignment {
    pub(crate) fn new(slot_count: usize) -> Self {
        Self {
            words: vec![None; slot_count],
            assigned: 0,
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<&Word> {
        self.words[slot].as_ref()
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        self.words[slot].is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.assigned == self.words.len()
    }

    pub fn len(&self) -> usize {
        self.assigned
    }

    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// The assigned `(slot, word)` pairs, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Word)> {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(slot, word)| word.as_ref().map(|word| (slot, word)))
    }

    pub(crate) fn set(&mut self, slot: SlotId, word: Word) {
        debug_assert!(self.words[slot].is_none());
        self.words[slot] = Some(word);
        self.assigned += 1;
    }

    pub(crate) fn unset(&mut self, slot: SlotId) {
        if self.words[slot].take().is_some() {
            self.assigned -= 1;
        }
    }
}

/// One level of the backtracking stack: a slot, the candidates not yet
/// tried for it, and the domain state to roll back to between candidates.
struct ChoicePoint {
    slot: SlotId,
    candidates: std::vec::IntoIter<Word>,
    baseline: DomainSnapshot,
}

/// The backtracking search driver.
///
/// A solve enforces node consistency once, runs a global arc-consistency
/// pass, and then branches over slot assignments, re-propagating after each
/// tentative assignment and rolling domains back when a branch dies. The
/// search is exhaustive: if any complete assignment satisfies the
/// constraints, one is found.
pub struct Solver {
    slot_heuristic: Box<dyn SlotSelection>,
    value_heuristic: Box<dyn ValueOrdering>,
}

impl Solver {
    pub fn new(
        slot_heuristic: Box<dyn SlotSelection>,
        value_heuristic: Box<dyn ValueOrdering>,
    ) -> Self {
        Self {
            slot_heuristic,
            value_heuristic,
        }
    }

    /// The default heuristics, but with value-ordering ties shuffled under
    /// the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            Box::new(MinimumRemainingValues),
            Box::new(LeastConstrainingValue::seeded(seed)),
        )
    }

    /// Fills the puzzle from the vocabulary.
    ///
    /// Returns the completed assignment, or `None` when no assignment of
    /// vocabulary words satisfies every length, distinctness, and overlap
    /// constraint. Unsolvable is an ordinary outcome, not an error.
    pub fn solve(
        &self,
        puzzle: &Puzzle,
        vocabulary: &Vocabulary,
    ) -> (Option<Assignment>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut domains = DomainStore::new(puzzle, vocabulary);

        enforce_node_consistency(puzzle, &mut domains);
        let started = Instant::now();
        let viable = ac3(puzzle, &mut domains, all_arcs(puzzle), &mut stats);
        stats.propagation_micros += started.elapsed().as_micros() as u64;
        if !viable {
            debug!("puzzle is unsolvable before search");
            return (None, stats);
        }

        let assignment = self.search(puzzle, &mut domains, &mut stats);
        (assignment, stats)
    }

    fn search(
        &self,
        puzzle: &Puzzle,
        domains: &mut DomainStore,
        stats: &mut SearchStats,
    ) -> Option<Assignment> {
        let mut assignment = Assignment::new(puzzle.slot_count());
        let mut stack: Vec<ChoicePoint> = Vec::new();

        loop {
            stats.nodes_visited += 1;
            if assignment.is_complete() {
                debug!(slots = assignment.len(), "search complete");
                return Some(assignment);
            }

            let Some(slot) = self
                .slot_heuristic
                .select_slot(puzzle, domains, &assignment)
            else {
                debug_assert!(assignment.is_complete());
                return Some(assignment);
            };
            let candidates =
                self.value_heuristic
                    .order_words(slot, puzzle, domains, &assignment);
            trace!(slot = %puzzle.slot(slot), candidates = candidates.len(), "opening choice point");
            stack.push(ChoicePoint {
                slot,
                candidates: candidates.into_iter(),
                baseline: domains.snapshot(),
            });

            // Walk the stack until some candidate survives propagation, then
            // go back around to open the next choice point.
            'advance: loop {
                let Some(point) = stack.last_mut() else {
                    // The root ran out of candidates: no solution exists.
                    return None;
                };
                let slot = point.slot;

                let Some(word) = point.candidates.next() else {
                    // This level is exhausted; undo the parent's current
                    // candidate and let it try its next one.
                    stack.pop();
                    if let Some(parent) = stack.last() {
                        stats.backtracks += 1;
                        assignment.unset(parent.slot);
                        domains.restore(&parent.baseline);
                    }
                    continue 'advance;
                };

                assignment.set(slot, word.clone());
                if !consistent(puzzle, &assignment, slot) {
                    stats.backtracks += 1;
                    assignment.unset(slot);
                    continue 'advance;
                }

                domains.assign(slot, word);
                let started = Instant::now();
                let viable = ac3(
                    puzzle,
                    domains,
                    puzzle.neighbors(slot).iter().map(|&z| (z, slot)),
                    stats,
                );
                stats.propagation_micros += started.elapsed().as_micros() as u64;
                if viable {
                    break 'advance;
                }

                trace!(slot = %puzzle.slot(slot), "propagation emptied a neighbor");
                stats.backtracks += 1;
                assignment.unset(slot);
                domains.restore(&point.baseline);
            }
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(
            Box::new(MinimumRemainingValues),
            Box::new(LeastConstrainingValue::new()),
        )
    }
}

/// Checks the partial assignment around a newly assigned slot: the word has
/// the slot's length, repeats no other assigned word, and agrees with every
/// assigned neighbor at the overlap. The rest of the assignment was checked
/// when it was built, so a local check suffices.
fn consistent(puzzle: &Puzzle, assignment: &Assignment, slot: SlotId) -> bool {
    let Some(word) = assignment.get(slot) else {
        return true;
    };
    if word.len() != puzzle.slot(slot).length {
        return false;
    }
    for (other, other_word) in assignment.iter() {
        if other != slot && other_word == word {
            return false;
        }
    }
    for &neighbor in puzzle.neighbors(slot) {
        if let Some(neighbor_word) = assignment.get(neighbor) {
            let Some((i, j)) = puzzle.overlap(slot, neighbor) else {
                continue;
            };
            if !overlap_matches(word, i, neighbor_word, j) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::heuristics::{Lexicographic, SelectFirst};

    const CROSS: &str = "#_#\n___\n#_#";
    const INDEPENDENT: &str = "___\n###\n___";

    fn solve(template: &str, words: &[&str]) -> (Puzzle, Option<Assignment>, SearchStats) {
        let puzzle = Puzzle::parse(template).unwrap();
        let vocabulary = Vocabulary::from_words(words);
        let (assignment, stats) = Solver::default().solve(&puzzle, &vocabulary);
        (puzzle, assignment, stats)
    }

    /// Every constraint the solver promises: lengths, distinctness, overlaps.
    fn assert_valid(puzzle: &Puzzle, vocabulary: &Vocabulary, assignment: &Assignment) {
        assert!(assignment.is_complete());
        for (slot, word) in assignment.iter() {
            assert_eq!(word.len(), puzzle.slot(slot).length);
            assert!(vocabulary.words().contains(word));
        }
        let words: Vec<&Word> = assignment.iter().map(|(_, word)| word).collect();
        for (i, a) in words.iter().enumerate() {
            for b in &words[i + 1..] {
                assert_ne!(a, b, "a word was used twice");
            }
        }
        for x in 0..puzzle.slot_count() {
            for &y in puzzle.neighbors(x) {
                let (i, j) = puzzle.overlap(x, y).unwrap();
                let (wx, wy) = (assignment.get(x).unwrap(), assignment.get(y).unwrap());
                assert_eq!(wx.as_bytes()[i], wy.as_bytes()[j], "overlap mismatch");
            }
        }
    }

    #[test]
    fn fills_a_crossing_pair() {
        let (puzzle, assignment, _) = solve(CROSS, &["cat", "car", "dog"]);
        let assignment = assignment.expect("a fill exists");
        assert_valid(
            &puzzle,
            &Vocabulary::from_words(["cat", "car", "dog"]),
            &assignment,
        );
        // Only CAT and CAR agree at the shared cell.
        let across = assignment.get(0).unwrap();
        let down = assignment.get(1).unwrap();
        assert_eq!(across.as_bytes()[1], b'A');
        assert_eq!(down.as_bytes()[1], b'A');
    }

    #[test]
    fn reports_unsolvable_when_overlaps_cannot_agree() {
        let (_, assignment, _) = solve(CROSS, &["car", "dog"]);
        assert_eq!(assignment, None);
    }

    #[test]
    fn reports_unsolvable_when_no_word_has_the_right_length() {
        let (_, assignment, _) = solve(CROSS, &["to", "be", "geese"]);
        assert_eq!(assignment, None);
    }

    #[test]
    fn empty_vocabulary_is_unsolvable() {
        let (_, assignment, _) = solve(CROSS, &[]);
        assert_eq!(assignment, None);
    }

    #[test]
    fn independent_slots_need_no_propagation() {
        let (puzzle, assignment, stats) = solve(INDEPENDENT, &["cat", "dog"]);
        let assignment = assignment.expect("independent slots just take words");
        assert_valid(&puzzle, &Vocabulary::from_words(["cat", "dog"]), &assignment);
        assert_eq!(stats.revisions, 0);
    }

    #[test]
    fn a_word_is_never_used_twice() {
        // One word, two slots: distinctness makes this unsolvable.
        let (_, assignment, _) = solve(INDEPENDENT, &["cat"]);
        assert_eq!(assignment, None);
    }

    #[test]
    fn backtracking_recovers_from_dead_ends() {
        // Both words fit either slot, so the first candidate tried for the
        // second slot always collides with the first and must be undone.
        let (puzzle, assignment, stats) = solve(CROSS, &["cat", "tat"]);
        let assignment = assignment.expect("CAT and TAT cross at their middle A");
        assert_valid(&puzzle, &Vocabulary::from_words(["cat", "tat"]), &assignment);
        assert!(stats.backtracks >= 1);
    }

    #[test]
    fn counts_nodes_and_propagation_work() {
        let (_, assignment, stats) = solve(CROSS, &["cat", "car", "dog"]);
        assert!(assignment.is_some());
        assert!(stats.nodes_visited >= 3);
        assert!(stats.revisions > 0);
    }

    #[test]
    fn alternate_heuristics_reach_a_valid_fill() {
        let puzzle = Puzzle::parse(CROSS).unwrap();
        let vocabulary = Vocabulary::from_words(["cat", "car", "dog"]);
        let solver = Solver::new(Box::new(SelectFirst), Box::new(Lexicographic));
        let (assignment, _) = solver.solve(&puzzle, &vocabulary);
        assert_valid(&puzzle, &vocabulary, &assignment.unwrap());
    }

    #[test]
    fn seeded_solver_is_reproducible_and_sound() {
        let puzzle = Puzzle::parse(CROSS).unwrap();
        let vocabulary = Vocabulary::from_words(["cat", "car", "can", "cot", "dog"]);
        let (a, _) = Solver::seeded(7).solve(&puzzle, &vocabulary);
        let (b, _) = Solver::seeded(7).solve(&puzzle, &vocabulary);
        assert_eq!(a, b);
        assert_valid(&puzzle, &vocabulary, &a.unwrap());
    }

    #[cfg(test)]
    mod prop_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Whatever the vocabulary, a returned fill satisfies every
            /// constraint, and "unsolvable" means no valid pair exists.
            #[test]
            fn crossing_fills_are_sound_and_complete(
                raw in prop::collection::vec("[A-D]{3}", 0..10)
            ) {
                let puzzle = Puzzle::parse("#_#\n___\n#_#").unwrap();
                let vocabulary = Vocabulary::from_words(raw.iter());
                let (assignment, _) = Solver::default().solve(&puzzle, &vocabulary);

                match assignment {
                    Some(assignment) => assert_valid(&puzzle, &vocabulary, &assignment),
                    None => {
                        // Brute force: no distinct pair agrees at the middle.
                        for a in vocabulary.words() {
                            for b in vocabulary.words() {
                                prop_assert!(
                                    a == b || a.as_bytes()[1] != b.as_bytes()[1],
                                    "solver missed {a} / {b}"
                                );
                            }
                        }
                    }
                }
            }

            /// Domains never grow: after a solve, re-running propagation on
            /// fresh domains reaches the same fixed point.
            #[test]
            fn repropagation_reaches_the_same_fixed_point(
                raw in prop::collection::vec("[A-D]{3}", 0..10)
            ) {
                let puzzle = Puzzle::parse("#_#\n___\n#_#").unwrap();
                let vocabulary = Vocabulary::from_words(raw.iter());
                let mut stats = SearchStats::default();

                let mut domains = DomainStore::new(&puzzle, &vocabulary);
                enforce_node_consistency(&puzzle, &mut domains);
                if ac3(&puzzle, &mut domains, all_arcs(&puzzle), &mut stats) {
                    let settled = domains.clone();
                    prop_assert!(ac3(&puzzle, &mut domains, all_arcs(&puzzle), &mut stats));
                    prop_assert_eq!(domains, settled);
                }
            }
        }
    }
}
