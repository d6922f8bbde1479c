use std::{fs, path::Path, str::FromStr};

use tracing::debug;

use crate::{
    error::{Error, Result},
    puzzle::slot::{Orientation, Slot, SlotId},
};

/// The grid structure and everything the solver needs to know about it.
///
/// A puzzle is parsed once from a structure template and read-only from then
/// on. Besides the slot set it precomputes the symmetric neighbor relation
/// (two slots of different orientation sharing a cell) and, for each
/// neighboring pair `(x, y)`, the in-word indices of the shared cell.
#[derive(Debug, Clone)]
pub struct Puzzle {
    height: usize,
    width: usize,
    open: Vec<Vec<bool>>,
    slots: Vec<Slot>,
    neighbors: Vec<Vec<SlotId>>,
    // n * n, row-major; None for non-neighboring pairs
    overlaps: Vec<Option<(usize, usize)>>,
}

impl Puzzle {
    /// Reads and parses a structure template from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let template = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&template)
    }

    /// Parses a structure template.
    ///
    /// `_` marks an open cell; any other character is a blocked cell. Lines
    /// shorter than the widest line are padded with blocked cells. A slot is
    /// a maximal run of at least two open cells in a row or column.
    pub fn parse(template: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = template.lines().map(|line| line.chars().collect()).collect();
        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(Error::MalformedStructure(
                "template has no cells".to_string(),
            ));
        }

        let open: Vec<Vec<bool>> = (0..height)
            .map(|r| (0..width).map(|c| rows[r].get(c) == Some(&'_')).collect())
            .collect();

        let mut slots = Vec::new();
        for r in 0..height {
            scan_runs(width, |c| open[r][c], |start, len| {
                slots.push(Slot {
                    row: r,
                    col: start,
                    length: len,
                    orientation: Orientation::Across,
                });
            });
        }
        for c in 0..width {
            scan_runs(height, |r| open[r][c], |start, len| {
                slots.push(Slot {
                    row: start,
                    col: c,
                    length: len,
                    orientation: Orientation::Down,
                });
            });
        }
        if slots.is_empty() {
            return Err(Error::MalformedStructure(
                "template defines no slots".to_string(),
            ));
        }

        let n = slots.len();
        let mut neighbors = vec![Vec::new(); n];
        let mut overlaps = vec![None; n * n];
        for (a, sa) in slots.iter().enumerate() {
            if sa.orientation != Orientation::Across {
                continue;
            }
            for (d, sd) in slots.iter().enumerate() {
                if sd.orientation != Orientation::Down {
                    continue;
                }
                let crosses = sa.col <= sd.col
                    && sd.col < sa.col + sa.length
                    && sd.row <= sa.row
                    && sa.row < sd.row + sd.length;
                if crosses {
                    let ia = sd.col - sa.col;
                    let id = sa.row - sd.row;
                    overlaps[a * n + d] = Some((ia, id));
                    overlaps[d * n + a] = Some((id, ia));
                    neighbors[a].push(d);
                    neighbors[d].push(a);
                }
            }
        }

        debug!(
            slots = n,
            crossings = neighbors.iter().map(Vec::len).sum::<usize>() / 2,
            "parsed structure"
        );
        Ok(Self {
            height,
            width,
            open,
            slots,
            neighbors,
            overlaps,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.open[row][col]
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id]
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The slots sharing a cell with `id`.
    pub fn neighbors(&self, id: SlotId) -> &[SlotId] {
        &self.neighbors[id]
    }

    /// For neighboring slots, the indices `(i, j)` such that any joint
    /// assignment must satisfy `word_x[i] == word_y[j]`. `None` for
    /// non-neighboring pairs.
    pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<(usize, usize)> {
        self.overlaps[x * self.slots.len() + y]
    }
}

impl FromStr for Puzzle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Calls `emit(start, len)` for every maximal run of length >= 2 along one
/// row or column.
fn scan_runs(extent: usize, is_open: impl Fn(usize) -> bool, mut emit: impl FnMut(usize, usize)) {
    let mut run_start = None;
    for i in 0..=extent {
        let open = i < extent && is_open(i);
        match (run_start, open) {
            (None, true) => run_start = Some(i),
            (Some(start), false) => {
                if i - start >= 2 {
                    emit(start, i - start);
                }
                run_start = None;
            }
            _ => {}
        }
    }
}
