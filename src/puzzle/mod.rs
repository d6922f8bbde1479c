//! The puzzle model: the grid structure, its slots, and the vocabulary.
//!
//! Everything in this module is immutable once constructed. The solver only
//! ever reads the slot set, the neighbor relation, and the overlap table.

pub mod grid;
pub mod slot;
pub mod vocabulary;

pub use grid::Puzzle;
pub use slot::{Orientation, Slot, SlotId};
pub use vocabulary::{Vocabulary, Word};
