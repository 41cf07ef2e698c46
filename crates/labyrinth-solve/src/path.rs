//! Path reconstruction and validation.

use std::collections::{HashMap, HashSet};

use labyrinth_grid::{CellId, CellLookup};

use crate::{Error, Result, SolutionStep};

/// Predecessor of each discovered cell.
pub type CameFrom = HashMap<CellId, CellId>;

/// Walk `came_from` back from `end` to `start`. The result starts at `start`.
///
/// Fails with [`Error::BrokenPath`] if a predecessor is missing, or if the
/// chain loops without reaching `start`.
pub fn reconstruct_path(
    start: &CellId,
    end: &CellId,
    came_from: &CameFrom,
) -> Result<Vec<CellId>> {
    let mut path = vec![end.clone()];
    let mut current = end;

    while current != start {
        let prev = came_from
            .get(current)
            .ok_or_else(|| Error::BrokenPath(current.clone()))?;

        if path.len() > came_from.len() {
            return Err(Error::BrokenPath(current.clone()));
        }

        path.push(prev.clone());
        current = prev;
    }

    path.reverse();
    Ok(path)
}

/// Whether `path` is a simple walk from `start` to `end` along open
/// neighbours of `cells`.
///
/// Consecutive cells must list each other as neighbours; a link recorded
/// on one side only is treated as a wall.
///
/// An empty path is valid only when `start == end`.
pub fn is_valid_path(cells: &dyn CellLookup, start: &str, end: &str, path: &[CellId]) -> bool {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return start == end;
    };
    if first.as_str() != start || last.as_str() != end {
        return false;
    }

    let mut seen = HashSet::with_capacity(path.len());

    for (i, id) in path.iter().enumerate() {
        if cells.cell(id.as_str()).is_none() || !seen.insert(id) {
            return false;
        }

        if i > 0 {
            let prev = &path[i - 1];
            let linked = cells
                .cell(prev.as_str())
                .is_some_and(|cell| cell.neighbors.contains(id))
                && cells
                    .cell(id.as_str())
                    .is_some_and(|cell| cell.neighbors.contains(prev));
            if !linked {
                return false;
            }
        }
    }

    true
}

/// Replays a reconstructed path as [`SolutionStep::Path`] steps.
///
/// The first cell (the start) only seeds `prev_cell_id` and is not emitted.
#[derive(Debug, Clone)]
pub(crate) struct PathReplay {
    path: std::vec::IntoIter<CellId>,
    prev: Option<CellId>,
}

impl PathReplay {
    pub(crate) fn new(path: Vec<CellId>) -> Self {
        let mut path = path.into_iter();
        let prev = path.next();
        Self { path, prev }
    }

    pub(crate) fn next_step(&mut self) -> Option<SolutionStep> {
        let cell = self.path.next()?;
        let prev_cell_id = self.prev.replace(cell.clone());

        Some(SolutionStep::Path {
            found_path: cell,
            prev_cell_id,
        })
    }
}
