use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense index of a slot within its [`Puzzle`](crate::puzzle::Puzzle).
///
/// Slots are enumerated once at construction and referenced by index
/// everywhere else, so the solver's tables can be plain vectors.
pub type SlotId = usize;

/// The direction a word runs through the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orientation {
    Across,
    Down,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Across => write!(f, "ACROSS"),
            Orientation::Down => write!(f, "DOWN"),
        }
    }
}

/// A maximal run of open cells holding one word.
///
/// Identity is the full tuple of position, length, and orientation. Slots are
/// never mutated after the puzzle is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub length: usize,
    pub orientation: Orientation,
}

impl Slot {
    /// Grid position of the `k`-th letter of this slot.
    pub fn cell(&self, k: usize) -> (usize, usize) {
        debug_assert!(k < self.length);
        match self.orientation {
            Orientation::Across => (self.row, self.col + k),
            Orientation::Down => (self.row + k, self.col),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) len {}",
            self.orientation, self.row, self.col, self.length
        )
    }
}
