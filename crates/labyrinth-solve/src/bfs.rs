//! Breadth-first search.
//!
//! Each dequeued cell becomes one [`SolutionStep::Search`], listing the
//! neighbours it discovered. The search stops when the end cell is dequeued;
//! the path back to the start is then replayed edge by edge.

use std::collections::{HashSet, VecDeque};

use labyrinth_grid::{CellId, CellLookup};
use tracing::{debug, trace};

use crate::path::{reconstruct_path, CameFrom, PathReplay};
use crate::serial::collect_path;
use crate::{Error, Result, SerialSolver, SolutionStep};

#[derive(Debug)]
enum Phase {
    Search,
    Path(PathReplay),
    Done,
}

/// Serial breadth-first search from `start` to `end`.
#[derive(Debug)]
pub struct BfsSearch {
    start: CellId,
    end: CellId,
    queue: VecDeque<CellId>,
    discovered: HashSet<CellId>,
    came_from: CameFrom,
    expanded: usize,
    phase: Phase,
}

impl BfsSearch {
    /// Fails if either endpoint is not in `cells`.
    pub fn new(start: CellId, end: CellId, cells: &dyn CellLookup) -> Result<Self> {
        for id in [&start, &end] {
            if cells.cell(id.as_str()).is_none() {
                return Err(Error::CellNotFound(id.clone()));
            }
        }

        debug!(%start, %end, "bfs started");

        Ok(Self {
            queue: VecDeque::from([start.clone()]),
            discovered: HashSet::from([start.clone()]),
            came_from: CameFrom::new(),
            expanded: 0,
            phase: Phase::Search,
            start,
            end,
        })
    }

    /// Cells expanded so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn search(&mut self, cells: &dyn CellLookup) -> Result<Option<SolutionStep>> {
        let Some(current) = self.queue.pop_front() else {
            return Err(Error::Unreachable {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        };

        if current == self.end {
            let path = reconstruct_path(&self.start, &self.end, &self.came_from)?;
            debug!(expanded = self.expanded, path_len = path.len(), "bfs reached the end");
            self.phase = Phase::Path(PathReplay::new(path));
            return Ok(None);
        }

        let cell = cells
            .cell(current.as_str())
            .ok_or_else(|| Error::CellNotFound(current.clone()))?;
        if cell.neighbors.is_empty() {
            return Err(Error::IsolatedCell(current));
        }

        let mut enqueued = Vec::new();
        for neighbor in &cell.neighbors {
            if self.discovered.insert(neighbor.clone()) {
                self.came_from.insert(neighbor.clone(), current.clone());
                self.queue.push_back(neighbor.clone());
                enqueued.push(neighbor.clone());
            }
        }

        self.expanded += 1;
        trace!(visited = %current, enqueued = enqueued.len(), "bfs expanded");

        Ok(Some(SolutionStep::Search {
            visited: current,
            enqueued,
        }))
    }
}

impl SerialSolver for BfsSearch {
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
        "breadth first search"
    }
}

/// Start a serial breadth-first search.
pub fn bfs_serial(start: CellId, end: CellId, cells: &dyn CellLookup) -> Result<BfsSearch> {
    BfsSearch::new(start, end, cells)
}

/// Shortest path from `start` to `end`, start first.
pub fn bfs(start: &CellId, end: &CellId, cells: &dyn CellLookup) -> Result<Vec<CellId>> {
    let mut search = BfsSearch::new(start.clone(), end.clone(), cells)?;
    collect_path(&mut search, start, cells)
}
