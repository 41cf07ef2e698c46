//! Maze Solvers
//!
//! Breadth-first search and A* over the open neighbours of a maze, each
//! available as a whole-result function and as a resumable [`SerialSolver`].
//!
//! # Serial solvers
//!
//! A serial solver is an explicit state machine. Each
//! [`SerialSolver::resume`] call does one unit of work and returns it as a
//! [`SolutionStep`]:
//!
//! 1. one step per expanded cell (the frontier it discovered),
//! 2. then one step per edge of the found path, start excluded.
//!
//! The solver borrows the maze only for the duration of a call, so whoever
//! owns the maze can keep the solver next to it between steps.
//!
//! # Visuals
//!
//! [`VisualSchema::apply_visual`] maps a step to cell patches for
//! `labyrinth-history`. Solvers and colours are independent.

mod astar;
mod bfs;
mod error;
mod heuristic;
mod path;
mod serial;
mod step;
mod visual;

use std::fmt;
use std::str::FromStr;

pub use astar::{a_star, a_star_serial, AStarSearch};
pub use bfs::{bfs, bfs_serial, BfsSearch};
pub use error::{Error, Result};
pub use heuristic::Heuristic;
pub use path::{is_valid_path, reconstruct_path, CameFrom};
pub use serial::{SerialSolver, Steps};
pub use step::{ScoredCell, SolutionStep};
pub use visual::{keys, CellColors, VisualSchema};

use labyrinth_grid::{CellId, CellLookup};

/// The available pathfinding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverKind {
    AStar,
    BreadthFirstSearch,
}

impl SolverKind {
    pub const ALL: [SolverKind; 2] = [SolverKind::AStar, SolverKind::BreadthFirstSearch];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::AStar => "A*",
            SolverKind::BreadthFirstSearch => "breadth first search",
        }
    }

    /// Start a serial run. `heuristic` is ignored by BFS.
    pub fn start(
        self,
        start: CellId,
        end: CellId,
        cells: &dyn CellLookup,
        heuristic: Heuristic,
    ) -> Result<Box<dyn SerialSolver>> {
        Ok(match self {
            SolverKind::AStar => Box::new(AStarSearch::new(start, end, cells, heuristic)?),
            SolverKind::BreadthFirstSearch => Box::new(BfsSearch::new(start, end, cells)?),
        })
    }

    /// Whole path from `start` to `end`, start first.
    pub fn solve(
        self,
        start: &CellId,
        end: &CellId,
        cells: &dyn CellLookup,
        heuristic: Heuristic,
    ) -> Result<Vec<CellId>> {
        match self {
            SolverKind::AStar => a_star(start, end, cells, heuristic),
            SolverKind::BreadthFirstSearch => bfs(start, end, cells),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSolver(s.to_owned()))
    }
}
