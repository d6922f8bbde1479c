//! Heuristics for selecting which slot to branch on next.

use std::cmp::Reverse;

use crate::{
    puzzle::{Puzzle, SlotId},
    solver::{domains::DomainStore, search::Assignment},
};

/// A strategy for choosing the next unassigned slot to branch on.
///
/// A good choice dramatically shrinks the search tree; a bad one degrades
/// backtracking toward exhaustive enumeration.
pub trait SlotSelection {
    /// Picks an unassigned slot, or `None` when every slot is assigned.
    fn select_slot(
        &self,
        puzzle: &Puzzle,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<SlotId>;
}

/// Selects the unassigned slot with the lowest [`SlotId`].
///
/// A deterministic baseline, useful in tests and as a degenerate strategy.
pub struct SelectFirst;

impl SlotSelection for SelectFirst {
    fn select_slot(
        &self,
        puzzle: &Puzzle,
        _domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<SlotId> {
        (0..puzzle.slot_count()).find(|&slot| !assignment.contains(slot))
    }
}

/// Minimum-remaining-values with a degree tie-break.
///
/// Prefers the slot with the smallest current domain, so the most
/// constrained slot fails as early as possible. Ties go to the slot with the
/// most neighbors, whose assignment prunes the most; remaining ties go to
/// the lower [`SlotId`] for determinism.
pub struct MinimumRemainingValues;

impl SlotSelection for MinimumRemainingValues {
    fn select_slot(
        &self,
        puzzle: &Puzzle,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<SlotId> {
        (0..puzzle.slot_count())
            .filter(|&slot| !assignment.contains(slot))
            .min_by_key(|&slot| {
                (
                    domains.len(slot),
                    Reverse(puzzle.neighbors(slot).len()),
                    slot,
                )
            })
    }
}
