//! Randomized Kruskal's algorithm.
//!
//! Every pair of orthogonally adjacent cells is a candidate edge. Candidates
//! are drawn uniformly at random without replacement; a candidate whose
//! cells are already connected is discarded, any other one is merged and
//! yielded. The yielded pairs form a spanning tree of the grid.

use labyrinth_grid::{CellId, CellPair};
use rand::Rng;
use tracing::debug;

use crate::error::{check_dimensions, Result};
use crate::UnionFind;

type Position = (usize, usize);

/// Every adjacent pair of a `rows × cols` grid, each exactly once.
///
/// The main sweep stops one short of both dimensions, so the rightmost
/// column's vertical pairs and the bottom row's horizontal pairs are added
/// separately.
pub fn all_neighbor_pairs(rows: usize, cols: usize) -> Vec<(Position, Position)> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let mut pairs = Vec::with_capacity(2 * rows * cols);

    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            pairs.push(((i, j), (i, j + 1)));
            pairs.push(((i, j), (i + 1, j)));
        }
    }

    for i in 0..rows - 1 {
        pairs.push(((i, cols - 1), (i + 1, cols - 1)));
    }

    for j in 0..cols - 1 {
        pairs.push(((rows - 1, j), (rows - 1, j + 1)));
    }

    pairs
}

/// Lazy Kruskal generator. Yields `rows * cols - 1` pairs, then stops.
#[derive(Debug)]
pub struct Kruskal<R> {
    sets: UnionFind<Position>,
    candidates: Vec<(Position, Position)>,
    rng: R,
}

impl<R: Rng> Kruskal<R> {
    /// Accepts `1..=MAX_ROWS` rows and `1..=MAX_COLUMNS` columns.
    pub fn new(rows: usize, cols: usize, rng: R) -> Result<Self> {
        check_dimensions(rows, cols, 1)?;

        let mut sets = UnionFind::new();
        for i in 0..rows {
            for j in 0..cols {
                sets.add((i, j));
            }
        }

        let candidates = all_neighbor_pairs(rows, cols);
        debug!(rows, cols, candidates = candidates.len(), "kruskal generator ready");

        Ok(Self {
            sets,
            candidates,
            rng,
        })
    }

    /// Candidate pairs not drawn yet.
    pub fn remaining_candidates(&self) -> usize {
        self.candidates.len()
    }
}

impl<R: Rng> Iterator for Kruskal<R> {
    type Item = CellPair;

    fn next(&mut self) -> Option<CellPair> {
        while !self.candidates.is_empty() {
            let pick = self.rng.gen_range(0..self.candidates.len());
            // each candidate is drawn once, used or not
            let (a, b) = self.candidates.swap_remove(pick);

            if self.sets.union(&a, &b) {
                return Some((CellId::rect(a.0, a.1), CellId::rect(b.0, b.1)));
            }
        }
        None
    }
}

impl<R: Rng> std::iter::FusedIterator for Kruskal<R> {}

/// Start a Kruskal generator over a `rows × cols` grid.
pub fn kruskal<R: Rng>(rows: usize, cols: usize, rng: R) -> Result<Kruskal<R>> {
    Kruskal::new(rows, cols, rng)
}
