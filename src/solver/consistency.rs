use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    puzzle::{Puzzle, SlotId, Word},
    solver::{domains::DomainStore, stats::SearchStats},
};

/// True when both words have a letter at the given positions and the letters
/// agree. Words of the wrong length simply never match, so callers need no
/// bounds checks of their own.
pub(crate) fn overlap_matches(a: &str, i: usize, b: &str, j: usize) -> bool {
    match (a.as_bytes().get(i), b.as_bytes().get(j)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Removes every candidate whose length differs from its slot's length.
///
/// Runs exactly once per solve, before any arc consistency. Words are never
/// lengthened afterwards, so the unary constraint stays satisfied for the
/// rest of the search.
pub fn enforce_node_consistency(puzzle: &Puzzle, domains: &mut DomainStore) {
    for (id, slot) in puzzle.slots().iter().enumerate() {
        let dead: Vec<Word> = domains
            .get(id)
            .iter()
            .filter(|w| w.len() != slot.length)
            .cloned()
            .collect();
        if !dead.is_empty() {
            trace!(slot = %slot, removed = dead.len(), "node consistency pruning");
            domains.shrink(id, &dead);
        }
    }
}

/// Makes `x` arc-consistent with respect to `y`: drops every word in `x`'s
/// domain that no word in `y`'s domain agrees with at the overlap. A no-op
/// for non-neighboring pairs. Returns whether `x`'s domain changed.
pub fn revise(
    puzzle: &Puzzle,
    domains: &mut DomainStore,
    x: SlotId,
    y: SlotId,
    stats: &mut SearchStats,
) -> bool {
    stats.revisions += 1;
    let Some((i, j)) = puzzle.overlap(x, y) else {
        return false;
    };

    let dead: Vec<Word> = domains
        .get(x)
        .iter()
        .filter(|wx| {
            !domains
                .get(y)
                .iter()
                .any(|wy| overlap_matches(wx, i, wy, j))
        })
        .cloned()
        .collect();
    if dead.is_empty() {
        return false;
    }
    stats.prunings += dead.len() as u64;
    domains.shrink(x, &dead)
}

/// Every arc `(x, y)` with `y` a neighbor of `x` — the seed for a global
/// propagation pass.
pub fn all_arcs(puzzle: &Puzzle) -> impl Iterator<Item = (SlotId, SlotId)> + '_ {
    (0..puzzle.slot_count())
        .flat_map(move |x| puzzle.neighbors(x).iter().map(move |&y| (x, y)))
}

/// Propagates the overlap constraints to a fixed point (AC-3).
///
/// The worklist is FIFO: processing order does not affect the result, but a
/// queue keeps runs deterministic and bounds requeueing. Whenever a revision
/// shrinks `x`, every arc `(z, x)` for the other neighbors `z` of `x` goes
/// back on the queue, since values they relied on may be gone.
///
/// Returns `false` as soon as any domain empties — the branch that led here
/// is infeasible — and `true` when the queue drains.
pub fn ac3<I>(puzzle: &Puzzle, domains: &mut DomainStore, arcs: I, stats: &mut SearchStats) -> bool
where
    I: IntoIterator<Item = (SlotId, SlotId)>,
{
    let mut queue: VecDeque<(SlotId, SlotId)> = arcs.into_iter().collect();
    while let Some((x, y)) = queue.pop_front() {
        if revise(puzzle, domains, x, y, stats) {
            if domains.is_empty(x) {
                debug!(slot = %puzzle.slot(x), "domain emptied during propagation");
                return false;
            }
            for &z in puzzle.neighbors(x) {
                if z != y {
                    queue.push_back((z, x));
                }
            }
        }
    }
    true
}
