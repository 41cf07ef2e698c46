//! A* search over cell centres.
//!
//! Every edge costs 1. The open list is re-sorted before each expansion by
//! ascending `f = g + h`, ties broken by ascending `h`; the sort is stable,
//! so remaining ties keep insertion order. Closed cells and the goal test are
//! keyed by cell id.

use std::collections::HashSet;

use labyrinth_grid::{CellId, CellLookup, Point2d};
use tracing::{debug, trace};

use crate::path::{reconstruct_path, CameFrom, PathReplay};
use crate::serial::collect_path;
use crate::{Error, Heuristic, Result, ScoredCell, SerialSolver, SolutionStep};

const EDGE_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone)]
struct OpenNode {
    id: CellId,
    g: f64,
    h: f64,
}

impl OpenNode {
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

#[derive(Debug)]
enum Phase {
    Search,
    Path(PathReplay),
    Done,
}

/// Serial A* search from `start` to `end`.
#[derive(Debug)]
pub struct AStarSearch {
    start: CellId,
    end: CellId,
    goal: Point2d,
    heuristic: Heuristic,
    open: Vec<OpenNode>,
    closed: HashSet<CellId>,
    came_from: CameFrom,
    phase: Phase,
}

fn center_of(cells: &dyn CellLookup, id: &CellId) -> Result<Point2d> {
    let cell = cells
        .cell(id.as_str())
        .ok_or_else(|| Error::CellNotFound(id.clone()))?;
    cell.center().ok_or_else(|| Error::NoGeometry(id.clone()))
}

impl AStarSearch {
    /// Fails if either endpoint is missing or has no walls.
    pub fn new(
        start: CellId,
        end: CellId,
        cells: &dyn CellLookup,
        heuristic: Heuristic,
    ) -> Result<Self> {
        let origin = center_of(cells, &start)?;
        let goal = center_of(cells, &end)?;

        debug!(%start, %end, %heuristic, "a* started");

        Ok(Self {
            open: vec![OpenNode {
                id: start.clone(),
                g: 0.0,
                h: heuristic.distance(origin, goal),
            }],
            closed: HashSet::new(),
            came_from: CameFrom::new(),
            phase: Phase::Search,
            start,
            end,
            goal,
            heuristic,
        })
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Cells expanded so far.
    pub fn expanded(&self) -> usize {
        self.closed.len()
    }

    fn search(&mut self, cells: &dyn CellLookup) -> Result<Option<SolutionStep>> {
        self.open
            .sort_by(|a, b| a.f().total_cmp(&b.f()).then(a.h.total_cmp(&b.h)));

        if self.open.is_empty() {
            return Err(Error::Unreachable {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        let current = self.open.remove(0);

        if current.id == self.end {
            let path = reconstruct_path(&self.start, &self.end, &self.came_from)?;
            debug!(expanded = self.expanded(), path_len = path.len(), "a* reached the end");
            self.phase = Phase::Path(PathReplay::new(path));
            return Ok(None);
        }

        let cell = cells
            .cell(current.id.as_str())
            .ok_or_else(|| Error::CellNotFound(current.id.clone()))?;
        self.closed.insert(current.id.clone());

        let mut scored = Vec::new();
        for neighbor in &cell.neighbors {
            let position = center_of(cells, neighbor)?;
            if self.closed.contains(neighbor) {
                continue;
            }

            let tentative = current.g + EDGE_WEIGHT;

            match self.open.iter_mut().find(|n| &n.id == neighbor) {
                Some(node) => {
                    if tentative < node.g {
                        node.g = tentative;
                        self.came_from.insert(neighbor.clone(), current.id.clone());
                        scored.push(ScoredCell::new(neighbor.clone(), node.g, node.h));
                    }
                }
                None => {
                    let h = self.heuristic.distance(position, self.goal);
                    self.open.push(OpenNode {
                        id: neighbor.clone(),
                        g: tentative,
                        h,
                    });
                    self.came_from
                        .entry(neighbor.clone())
                        .or_insert_with(|| current.id.clone());
                    scored.push(ScoredCell::new(neighbor.clone(), tentative, h));
                }
            }
        }

        trace!(visited = %current.id, scored = scored.len(), open = self.open.len(), "a* expanded");

        Ok(Some(SolutionStep::Expand {
            visited: current.id,
            scored,
        }))
    }
}

impl SerialSolver for AStarSearch {
    fn resume(&mut self, cells: &dyn CellLookup) -> Option<Result<SolutionStep>> {
        loop {
            match &mut self.phase {
                Phase::Search => match self.search(cells) {
                    Ok(Some(step)) => return Some(Ok(step)),
                    Ok(None) => continue,
                    Err(err) => {
                        self.phase = Phase::Done;
                        return Some(Err(err));
                    }
                },
                Phase::Path(replay) => {
                    if let Some(step) = replay.next_step() {
                        return Some(Ok(step));
                    }
                    self.phase = Phase::Done;
                }
                Phase::Done => return None,
            }
        }
    }

    fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    fn name(&self) -> &'static str {
        "A*"
    }
}

/// Start a serial A* search.
pub fn a_star_serial(
    start: CellId,
    end: CellId,
    cells: &dyn CellLookup,
    heuristic: Heuristic,
) -> Result<AStarSearch> {
    AStarSearch::new(start, end, cells, heuristic)
}

/// A path from `start` to `end`, start first.
pub fn a_star(
    start: &CellId,
    end: &CellId,
    cells: &dyn CellLookup,
    heuristic: Heuristic,
) -> Result<Vec<CellId>> {
    let mut search = AStarSearch::new(start.clone(), end.clone(), cells, heuristic)?;
    collect_path(&mut search, start, cells)
}
