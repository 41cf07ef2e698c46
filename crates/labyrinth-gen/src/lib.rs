//! Perfect-Maze Generators
//!
//! A generator turns a closed rectangular grid into a perfect maze: a
//! spanning tree over the grid graph, with exactly one path between any two
//! cells.
//!
//! # Output
//!
//! Generators never touch cells. They are lazy iterators of [`CellPair`]s,
//! each naming two orthogonally adjacent cells whose shared wall should be
//! removed. A full run yields exactly `rows * cols - 1` pairs and then stays
//! exhausted. Feed the pairs to [`labyrinth_grid::RectMaze::carve`].
//!
//! # Algorithms
//!
//! - [`Kruskal`]: random edge order, cycles rejected through [`UnionFind`].
//! - [`RecursiveBacktracking`]: random depth-first walk on an explicit stack.
//!
//! Both are generic over [`rand::Rng`], so a seeded RNG replays a maze.

mod backtracking;
mod error;
mod kruskal;
mod union_find;

use std::fmt;
use std::str::FromStr;

pub use backtracking::{recursive_backtracking, RecursiveBacktracking};
pub use error::{Error, Result};
pub use kruskal::{all_neighbor_pairs, kruskal, Kruskal};
pub use labyrinth_grid::CellPair;
pub use union_find::UnionFind;

use rand::Rng;

/// The available generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneratorKind {
    #[default]
    Kruskal,
    RecursiveBacktracking,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 2] =
        [GeneratorKind::Kruskal, GeneratorKind::RecursiveBacktracking];

    /// Display name, also accepted by [`GeneratorKind::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Kruskal => "kruskal",
            GeneratorKind::RecursiveBacktracking => "recursive backtracking",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::UnknownGenerator(name.to_owned()))
    }

    /// Smallest row and column count the algorithm accepts.
    pub fn min_dimension(self) -> usize {
        match self {
            GeneratorKind::Kruskal => 1,
            GeneratorKind::RecursiveBacktracking => 2,
        }
    }

    /// Start this algorithm over a `rows × cols` grid.
    pub fn start<R: Rng>(self, rows: usize, cols: usize, rng: R) -> Result<MazeGenerator<R>> {
        match self {
            GeneratorKind::Kruskal => Kruskal::new(rows, cols, rng).map(MazeGenerator::Kruskal),
            GeneratorKind::RecursiveBacktracking => RecursiveBacktracking::new(rows, cols, rng)
                .map(MazeGenerator::RecursiveBacktracking),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// A running generator of either kind.
#[derive(Debug)]
pub enum MazeGenerator<R> {
    Kruskal(Kruskal<R>),
    RecursiveBacktracking(RecursiveBacktracking<R>),
}

impl<R: Rng> MazeGenerator<R> {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            MazeGenerator::Kruskal(_) => GeneratorKind::Kruskal,
            MazeGenerator::RecursiveBacktracking(_) => GeneratorKind::RecursiveBacktracking,
        }
    }
}

impl<R: Rng> Iterator for MazeGenerator<R> {
    type Item = CellPair;

    fn next(&mut self) -> Option<CellPair> {
        match self {
            MazeGenerator::Kruskal(g) => g.next(),
            MazeGenerator::RecursiveBacktracking(g) => g.next(),
        }
    }
}

impl<R: Rng> std::iter::FusedIterator for MazeGenerator<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_grid::{create_rect_maze, CellId, MAX_COLUMNS, MAX_ROWS, MIN_COLUMNS, MIN_ROWS};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    /// Cells reachable from "0,0" through open neighbours.
    fn reachable(maze: &labyrinth_grid::RectMaze) -> usize {
        let mut seen = HashSet::from([CellId::rect(0, 0)]);
        let mut queue = VecDeque::from([CellId::rect(0, 0)]);

        while let Some(id) = queue.pop_front() {
            for next in &maze.find(id.as_str()).unwrap().neighbors {
                if seen.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }
        seen.len()
    }

    #[test]
    fn names_round_trip() {
        for kind in GeneratorKind::ALL {
            assert_eq!(kind.name().parse::<GeneratorKind>().unwrap(), kind);
        }
        assert_eq!(
            GeneratorKind::from_name("Recursive Backtracking").unwrap(),
            GeneratorKind::RecursiveBacktracking
        );
        assert_eq!(
            GeneratorKind::from_name("prim").unwrap_err(),
            Error::UnknownGenerator("prim".into())
        );
    }

    #[test]
    fn kind_reports_running_algorithm() {
        let generator = GeneratorKind::RecursiveBacktracking
            .start(5, 5, StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(generator.kind(), GeneratorKind::RecursiveBacktracking);
    }

    #[test]
    fn kruskal_spans_a_single_component() {
        let (rows, cols) = (9, 13);
        let pairs: Vec<_> = kruskal(rows, cols, StdRng::seed_from_u64(21)).unwrap().collect();

        let mut sets = UnionFind::new();
        for i in 0..rows {
            for j in 0..cols {
                sets.add(CellId::rect(i, j));
            }
        }
        for (a, b) in &pairs {
            assert!(sets.union(a, b), "pair {a} - {b} closes a cycle");
        }

        let origin = CellId::rect(0, 0);
        for i in 0..rows {
            for j in 0..cols {
                assert!(sets.connected(&origin, &CellId::rect(i, j)));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn carved_grid_is_a_perfect_maze(
            rows in MIN_ROWS..=20usize,
            cols in MIN_COLUMNS..=20usize,
            depth_first in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let kind = if depth_first {
                GeneratorKind::RecursiveBacktracking
            } else {
                GeneratorKind::Kruskal
            };
            let pairs: Vec<_> = kind
                .start(rows, cols, StdRng::seed_from_u64(seed))
                .unwrap()
                .collect();

            let mut maze = create_rect_maze(rows, cols, 10.0).unwrap();
            maze.carve(&pairs).unwrap();

            prop_assert_eq!(maze.open_edge_count(), rows * cols - 1);
            prop_assert_eq!(reachable(&maze), rows * cols);
        }
    }

    #[test]
    fn largest_grid_generates() {
        for kind in GeneratorKind::ALL {
            let count = kind
                .start(MAX_ROWS, MAX_COLUMNS, StdRng::seed_from_u64(1))
                .unwrap()
                .count();
            assert_eq!(count, MAX_ROWS * MAX_COLUMNS - 1);
        }
    }
}
