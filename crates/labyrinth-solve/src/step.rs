//! Partial solutions emitted by serial solvers.

use labyrinth_grid::CellId;

/// Scores of one cell put on the A* open list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredCell {
    pub id: CellId,
    /// Cost from the start, rounded.
    pub g: i64,
    /// Heuristic distance to the end, rounded.
    pub h: i64,
    /// `g + h`, rounded.
    pub f: i64,
}

impl ScoredCell {
    pub(crate) fn new(id: CellId, g: f64, h: f64) -> Self {
        Self {
            id,
            g: g.round() as i64,
            h: h.round() as i64,
            f: (g + h).round() as i64,
        }
    }
}

/// One step of a serial solver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SolutionStep {
    /// BFS expanded `visited` and discovered `enqueued`.
    Search { visited: CellId, enqueued: Vec<CellId> },
    /// A* expanded `visited` and (re)scored the listed neighbours.
    Expand { visited: CellId, scored: Vec<ScoredCell> },
    /// `found_path` is on the solution, reached from `prev_cell_id`.
    Path {
        found_path: CellId,
        prev_cell_id: Option<CellId>,
    },
}

impl SolutionStep {
    pub fn is_path_cell(&self) -> bool {
        matches!(self, SolutionStep::Path { .. })
    }

    /// The cell this step is about.
    pub fn cell(&self) -> &CellId {
        match self {
            SolutionStep::Search { visited, .. } | SolutionStep::Expand { visited, .. } => visited,
            SolutionStep::Path { found_path, .. } => found_path,
        }
    }
}
