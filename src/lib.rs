//! Crossfill fills crossword grids from a word list by treating the grid as
//! a constraint satisfaction problem.
//!
//! Every *slot* — a maximal run of open cells — is a variable whose domain
//! starts as the whole vocabulary. Slot length is a unary constraint;
//! crossing slots constrain each other at their shared cell; and no word may
//! be used twice. The solver enforces node consistency, propagates the
//! overlap constraints to arc consistency (AC-3), and then runs a
//! backtracking search ordered by the minimum-remaining-values and
//! least-constraining-value heuristics, re-propagating after every
//! tentative assignment.
//!
//! An unsolvable puzzle is a normal outcome, reported as `None` — not an
//! error.
//!
//! # Example
//!
//! A three-by-three grid with one across slot crossing one down slot at
//! their middle letters:
//!
//! ```
//! use crossfill::puzzle::{Puzzle, Vocabulary};
//! use crossfill::solver::Solver;
//!
//! let puzzle = Puzzle::parse("#_#\n___\n#_#").unwrap();
//! assert_eq!(puzzle.slot_count(), 2);
//!
//! let vocabulary = Vocabulary::from_words(["cat", "car", "dog"]);
//! let (assignment, stats) = Solver::default().solve(&puzzle, &vocabulary);
//!
//! let assignment = assignment.expect("this grid has a fill");
//! let across = assignment.get(0).unwrap();
//! let down = assignment.get(1).unwrap();
//!
//! // The words agree at the shared cell and differ from each other.
//! assert_eq!(across.as_bytes()[1], down.as_bytes()[1]);
//! assert_ne!(across, down);
//! assert!(stats.nodes_visited > 0);
//! ```

pub mod error;
pub mod puzzle;
pub mod render;
pub mod solver;
