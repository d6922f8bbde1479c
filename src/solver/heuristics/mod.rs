//! Ordering heuristics for the backtracking search.
//!
//! Slot selection decides which slot to branch on next; value ordering
//! decides which candidate words to try first. The defaults are the standard
//! CSP pairing of minimum-remaining-values and least-constraining-value.

pub mod slot;
pub mod value;

pub use slot::{MinimumRemainingValues, SelectFirst, SlotSelection};
pub use value::{LeastConstrainingValue, Lexicographic, ValueOrdering};
