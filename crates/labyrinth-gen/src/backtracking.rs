//! Randomized depth-first search ("recursive backtracking") with an explicit
//! stack.
//!
//! The walk carves from the top of the stack into a random unvisited grid
//! neighbour, yielding that pair. A cell with no unvisited neighbours is
//! popped without yielding. The walk ends when the stack is empty, by which
//! point every cell has been visited exactly once.

use labyrinth_grid::{CellId, CellPair};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::error::{check_dimensions, Result};

type Position = (usize, usize);

/// Lazy depth-first generator. Yields `rows * cols - 1` pairs, then stops.
#[derive(Debug)]
pub struct RecursiveBacktracking<R> {
    rows: usize,
    cols: usize,
    visited: Vec<bool>,
    stack: Vec<Position>,
    rng: R,
}

impl<R: Rng> RecursiveBacktracking<R> {
    /// Accepts `2..=MAX_ROWS` rows and `2..=MAX_COLUMNS` columns. The start
    /// cell is drawn from `rng`.
    pub fn new(rows: usize, cols: usize, mut rng: R) -> Result<Self> {
        check_dimensions(rows, cols, 2)?;

        let start = (rng.gen_range(0..rows), rng.gen_range(0..cols));
        debug!(rows, cols, start = ?start, "recursive backtracking generator ready");

        Ok(Self {
            rows,
            cols,
            visited: vec![false; rows * cols],
            stack: vec![start],
            rng,
        })
    }

    /// Cells on the current walk, bottom first.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn is_visited(&self, (i, j): Position) -> bool {
        self.visited[i * self.cols + j]
    }

    fn mark_visited(&mut self, (i, j): Position) {
        self.visited[i * self.cols + j] = true;
    }

    /// In-grid neighbours in right, down, up, left order.
    fn unvisited_neighbors(&self, (i, j): Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);

        if j + 1 < self.cols {
            neighbors.push((i, j + 1));
        }
        if i + 1 < self.rows {
            neighbors.push((i + 1, j));
        }
        if i > 0 {
            neighbors.push((i - 1, j));
        }
        if j > 0 {
            neighbors.push((i, j - 1));
        }

        neighbors.retain(|&p| !self.is_visited(p));
        neighbors
    }
}

impl<R: Rng> Iterator for RecursiveBacktracking<R> {
    type Item = CellPair;

    fn next(&mut self) -> Option<CellPair> {
        while let Some(&current) = self.stack.last() {
            let candidates = self.unvisited_neighbors(current);
            let chosen = candidates.choose(&mut self.rng).copied();
            self.mark_visited(current);

            match chosen {
                Some(next) => {
                    self.stack.push(next);
                    return Some((CellId::rect(current.0, current.1), CellId::rect(next.0, next.1)));
                }
                None => {
                    self.stack.pop();
                    trace!(depth = self.stack.len(), "backtrack");
                }
            }
        }
        None
    }
}

impl<R: Rng> std::iter::FusedIterator for RecursiveBacktracking<R> {}

/// Start a depth-first generator over a `rows × cols` grid.
pub fn recursive_backtracking<R: Rng>(
    rows: usize,
    cols: usize,
    rng: R,
) -> Result<RecursiveBacktracking<R>> {
    RecursiveBacktracking::new(rows, cols, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn yields_tree_edge_count() {
        let pairs: Vec<_> = recursive_backtracking(5, 10, StdRng::seed_from_u64(3))
            .unwrap()
            .collect();
        assert_eq!(pairs.len(), 49);
    }

    #[test]
    fn pairs_are_grid_adjacent() {
        let pairs = recursive_backtracking(6, 6, StdRng::seed_from_u64(11)).unwrap();

        for (a, b) in pairs {
            let (r1, c1) = a.rect_position().unwrap();
            let (r2, c2) = b.rect_position().unwrap();
            assert_eq!(r1.abs_diff(r2) + c1.abs_diff(c2), 1);
        }
    }

    #[test]
    fn every_cell_is_entered_once() {
        let pairs: Vec<_> = recursive_backtracking(7, 4, StdRng::seed_from_u64(5))
            .unwrap()
            .collect();

        // the start cell is the only one never entered
        let entered: HashSet<_> = pairs.iter().map(|(_, b)| b.clone()).collect();
        assert_eq!(entered.len(), 27);
        assert!(!entered.contains(&pairs[0].0));
    }

    #[test]
    fn walk_continues_from_the_last_entered_cell_or_backtracks() {
        let mut generator = recursive_backtracking(5, 5, StdRng::seed_from_u64(8)).unwrap();
        let first = generator.next().unwrap();
        let second = generator.next().unwrap();

        assert_eq!(generator.depth(), 3);
        assert_eq!(second.0, first.1);
    }

    #[test]
    fn exhausted_generator_stays_done() {
        let mut generator = recursive_backtracking(3, 3, StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(generator.by_ref().count(), 8);
        assert_eq!(generator.depth(), 0);
        assert!(generator.next().is_none());
    }

    #[test]
    fn rejects_single_row_or_column() {
        assert!(matches!(
            recursive_backtracking(1, 5, StdRng::seed_from_u64(0)).unwrap_err(),
            Error::RowsOutOfRange { value: 1, min: 2, .. }
        ));
        assert!(matches!(
            recursive_backtracking(5, 101, StdRng::seed_from_u64(0)).unwrap_err(),
            Error::ColumnsOutOfRange { value: 101, .. }
        ));
    }
}
