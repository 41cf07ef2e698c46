//! Resumable solver interface.

use labyrinth_grid::CellLookup;

use crate::{Result, SolutionStep};

/// A pathfinding run that advances one step per call.
///
/// The solver keeps its own frontier but not the maze: every call borrows
/// the cells again, so the owner of the maze can hold the solver alongside
/// it. Passing a different maze than the one the solver started on is a
/// caller bug; the solver reports whatever inconsistency it runs into.
pub trait SerialSolver: Send {
    /// Produce the next step, or `None` once exhausted.
    ///
    /// After an error or `None` every later call returns `None`.
    fn resume(&mut self, cells: &dyn CellLookup) -> Option<Result<SolutionStep>>;

    /// Whether `resume` will only return `None` from now on.
    fn is_finished(&self) -> bool;

    /// Algorithm name for logs.
    fn name(&self) -> &'static str;
}

impl<S: SerialSolver + ?Sized> SerialSolver for Box<S> {
    fn resume(&mut self, cells: &dyn CellLookup) -> Option<Result<SolutionStep>> {
        (**self).resume(cells)
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Iterator over the remaining steps of a solver.
pub struct Steps<'a, S: ?Sized> {
    solver: &'a mut S,
    cells: &'a dyn CellLookup,
}

impl<'a, S: SerialSolver + ?Sized> Steps<'a, S> {
    pub fn new(solver: &'a mut S, cells: &'a dyn CellLookup) -> Self {
        Self { solver, cells }
    }
}

impl<S: SerialSolver + ?Sized> Iterator for Steps<'_, S> {
    type Item = Result<SolutionStep>;

    fn next(&mut self) -> Option<Self::Item> {
        self.solver.resume(self.cells)
    }
}

impl<S: SerialSolver + ?Sized> std::iter::FusedIterator for Steps<'_, S> {}

/// Drain `solver` and return the full path, start first.
pub(crate) fn collect_path<S: SerialSolver + ?Sized>(
    solver: &mut S,
    start: &labyrinth_grid::CellId,
    cells: &dyn CellLookup,
) -> Result<Vec<labyrinth_grid::CellId>> {
    let mut path = vec![start.clone()];

    for step in Steps::new(solver, cells) {
        if let SolutionStep::Path { found_path, .. } = step? {
            path.push(found_path);
        }
    }

    Ok(path)
}
