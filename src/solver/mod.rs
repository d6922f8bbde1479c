//! The constraint-satisfaction core.
//!
//! [`domains::DomainStore`] holds the shrinking candidate sets, the
//! [`consistency`] module enforces the unary and binary constraints over
//! them, and [`search::Solver`] drives the backtracking search.

pub mod consistency;
pub mod domains;
pub mod heuristics;
pub mod search;
pub mod stats;

pub use search::{Assignment, Solver};
pub use stats::SearchStats;
