//! Projects a solved (or partial) assignment back onto the grid for display.

use crate::{puzzle::Puzzle, solver::Assignment};

/// One letter per open cell, `None` where nothing is filled in yet.
pub fn letter_grid(puzzle: &Puzzle, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; puzzle.width()]; puzzle.height()];
    for (id, word) in assignment.iter() {
        let slot = puzzle.slot(id);
        for (k, ch) in word.chars().enumerate() {
            let (row, col) = slot.cell(k);
            letters[row][col] = Some(ch);
        }
    }
    letters
}

/// Renders the grid as text: blocked cells as `█`, unfilled open cells as
/// spaces, one line per row.
pub fn render_text(puzzle: &Puzzle, assignment: &Assignment) -> String {
    let letters = letter_grid(puzzle, assignment);
    let mut out = String::new();
    for row in 0..puzzle.height() {
        for col in 0..puzzle.width() {
            if puzzle.is_open(row, col) {
                out.push(letters[row][col].unwrap_or(' '));
            } else {
                out.push('█');
            }
        }
        out.push('\n');
    }
    out
}
