//! The session controller.
//!
//! A [`MazeSession`] owns the maze, the active solver and the cell history.
//! Stepping forward first replays recorded history and only pulls a fresh
//! step from the solver once the cursor is at the end; stepping backward
//! never touches the solver.

use std::fmt;
use std::str::FromStr;

use labyrinth_grid::{CellId, CellPair, RectMaze};
use labyrinth_history::{CellHistory, CellPatch, CellState};
use labyrinth_solve::{SerialSolver, SolutionStep, Steps};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{BackwardAtStart, SessionConfig};
use crate::registry::{AlgoFeature, GeneratorRegistry, SolverRegistry};
use crate::{Error, Result};

/// Which endpoint a cell click sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellSelection {
    #[default]
    None,
    Start,
    End,
}

/// Direction of a playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeDirection {
    Forward,
    Backward,
}

impl fmt::Display for TimeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeDirection::Forward => f.write_str("forward"),
            TimeDirection::Backward => f.write_str("backward"),
        }
    }
}

impl FromStr for TimeDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(TimeDirection::Forward),
            "backward" => Ok(TimeDirection::Backward),
            other => Err(Error::InvalidConfig(format!("unknown time direction {other:?}"))),
        }
    }
}

/// What a single [`MazeSession::take_step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cursor moved and a visual change was published.
    Stepped,
    /// Backward with nothing left to undo.
    AtStart,
    /// Forward with no redo step and no solver steps left.
    Exhausted,
}

/// Interactive maze state: grid, endpoints, solver and playback history.
pub struct MazeSession {
    config: SessionConfig,
    solvers: SolverRegistry,
    generators: GeneratorRegistry,
    rng: StdRng,

    rows: usize,
    cols: usize,
    generator: String,
    solver_id: u32,
    start: CellId,
    end: CellId,
    selection: CellSelection,

    maze: Option<RectMaze>,
    epoch: u64,
    solver: Option<Box<dyn SerialSolver>>,
    history: CellHistory,
    current_change: Option<Vec<CellPatch>>,
    solution: Vec<CellId>,
}

impl fmt::Debug for MazeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MazeSession")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("generator", &self.generator)
            .field("solver_id", &self.solver_id)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("epoch", &self.epoch)
            .field("history_index", &self.history.history_index())
            .field("solver", &self.solver.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl MazeSession {
    /// Session with the default registries. No maze is built yet.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_registries(config, SolverRegistry::default(), GeneratorRegistry::default())
    }

    pub fn with_registries(
        config: SessionConfig,
        solvers: SolverRegistry,
        generators: GeneratorRegistry,
    ) -> Result<Self> {
        config.validate()?;
        solvers.by_id(config.solver_id)?;
        generators.by_name(&config.generator)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            generator: config.generator.clone(),
            solver_id: config.solver_id,
            start: CellId::rect(0, 0),
            end: CellId::rect(config.rows - 1, config.cols - 1),
            selection: CellSelection::None,
            config,
            solvers,
            generators,
            rng,
            maze: None,
            epoch: 0,
            solver: None,
            history: CellHistory::new(),
            current_change: None,
            solution: Vec::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn solvers(&self) -> &SolverRegistry {
        &self.solvers
    }

    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Takes effect on the next [`init_maze`](Self::init_maze) or
    /// [`generate_maze`](Self::generate_maze).
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        self.config.bounds.validate(rows, self.cols)?;
        self.rows = rows;
        Ok(())
    }

    /// Takes effect on the next [`init_maze`](Self::init_maze) or
    /// [`generate_maze`](Self::generate_maze).
    pub fn set_cols(&mut self, cols: usize) -> Result<()> {
        self.config.bounds.validate(self.rows, cols)?;
        self.cols = cols;
        Ok(())
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn set_generator(&mut self, name: &str) -> Result<()> {
        self.generators.by_name(name)?;
        self.generator = name.to_owned();
        Ok(())
    }

    pub fn solver_id(&self) -> u32 {
        self.solver_id
    }

    pub fn solver_name(&self) -> &str {
        self.solvers
            .by_id(self.solver_id)
            .map_or("", |entry| entry.name.as_str())
    }

    /// Switch solver. Any recorded playback is dropped.
    pub fn set_solver_id(&mut self, id: u32) -> Result<()> {
        self.solvers.by_id(id)?;
        if id != self.solver_id {
            self.solver_id = id;
            self.reset_solver_state();
        }
        Ok(())
    }

    pub fn start(&self) -> &CellId {
        &self.start
    }

    pub fn end(&self) -> &CellId {
        &self.end
    }

    /// Move the start cell, resetting playback if it changed.
    pub fn set_start(&mut self, id: CellId) {
        if id != self.start {
            self.start = id;
            self.reset_solver_state();
        }
    }

    /// Move the end cell, resetting playback if it changed.
    pub fn set_end(&mut self, id: CellId) {
        if id != self.end {
            self.end = id;
            self.reset_solver_state();
        }
    }

    pub fn cell_selection(&self) -> CellSelection {
        self.selection
    }

    pub fn set_cell_selection(&mut self, selection: CellSelection) {
        self.selection = selection;
    }

    /// Apply the selection mode to a clicked cell.
    ///
    /// Returns whether an endpoint changed.
    pub fn select_cell(&mut self, id: &str) -> Result<bool> {
        let maze = self.maze.as_ref().ok_or(Error::NoMaze)?;
        if !maze.contains(id) {
            return Err(Error::UnknownCell(CellId::from(id)));
        }

        let id = CellId::from(id);
        let changed = match self.selection {
            CellSelection::None => return Ok(false),
            CellSelection::Start => id != self.start,
            CellSelection::End => id != self.end,
        };

        match self.selection {
            CellSelection::Start => self.set_start(id),
            CellSelection::End => self.set_end(id),
            CellSelection::None => {}
        }
        Ok(changed)
    }

    /// Build a wall-complete grid and put the end in the bottom-right corner.
    pub fn init_maze(&mut self, cell_size: f64) -> Result<()> {
        let maze = RectMaze::with_bounds(&self.config.bounds, self.rows, self.cols, cell_size)?;
        self.end = maze.last_id();
        self.replace_maze(maze);
        Ok(())
    }

    /// Run the selected generator and carve a fresh maze.
    ///
    /// Endpoints that fall outside the new grid move back to the corners.
    pub fn generate_maze(&mut self) -> Result<()> {
        let kind = self.generators.by_name(&self.generator)?.kind;
        let cell_size = self
            .maze
            .as_ref()
            .map_or(self.config.cell_size, RectMaze::cell_size);

        let pairs: Vec<CellPair> = kind.start(self.rows, self.cols, &mut self.rng)?.collect();
        let mut maze = RectMaze::with_bounds(&self.config.bounds, self.rows, self.cols, cell_size)?;
        maze.carve(&pairs)?;

        if !maze.contains(self.start.as_str()) {
            self.start = CellId::rect(0, 0);
        }
        if !maze.contains(self.end.as_str()) {
            self.end = maze.last_id();
        }

        debug!(
            generator = %kind,
            rows = self.rows,
            cols = self.cols,
            passages = pairs.len(),
            "generated maze"
        );
        self.replace_maze(maze);
        Ok(())
    }

    pub fn maze(&self) -> Option<&RectMaze> {
        self.maze.as_ref()
    }

    /// Drop the solver, the history, the published change and the solution.
    pub fn reset_solver_state(&mut self) {
        self.history.clear();
        if let Some(solver) = self.solver.take() {
            debug!(solver = solver.name(), "dropped solver");
        }
        self.current_change = None;
        self.solution.clear();
        self.epoch += 1;
    }

    /// Move the playback cursor one step.
    pub fn take_step(&mut self, direction: TimeDirection) -> Result<StepOutcome> {
        match direction {
            TimeDirection::Backward => Ok(self.step_backward()),
            TimeDirection::Forward => self.step_forward(),
        }
    }

    /// Boolean form of [`take_step`](Self::take_step).
    ///
    /// `false` going forward means there is nothing left to play. Going
    /// backward at the start reports what the [`BackwardAtStart`] policy
    /// says.
    pub fn take_step_in_solution(&mut self, direction: TimeDirection) -> Result<bool> {
        Ok(match self.take_step(direction)? {
            StepOutcome::Stepped => true,
            StepOutcome::AtStart => self.config.backward_at_start == BackwardAtStart::Succeed,
            StepOutcome::Exhausted => false,
        })
    }

    /// Jump to the final state of the current solver.
    ///
    /// Recorded redo steps are replayed first, then every remaining solver
    /// step is committed as a single history step. Returns the number of
    /// solver steps drained.
    ///
    /// If the solver fails part way, the steps drained before the failure
    /// are still committed and the error is returned.
    pub fn solve_maze(&mut self) -> Result<usize> {
        let mut replayed = false;
        while self.history.can_redo() {
            self.history.redo();
            replayed = true;
        }
        if replayed {
            self.publish_forward();
        }

        self.ensure_solver(AlgoFeature::JumpToFinal)?;
        let (Some(maze), Some(solver)) = (self.maze.as_ref(), self.solver.as_mut()) else {
            return Err(Error::NoMaze);
        };

        let mut steps = Vec::new();
        let mut failure = None;
        for step in Steps::new(solver, maze) {
            match step {
                Ok(step) => steps.push(step),
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        if !steps.is_empty() {
            for step in &steps {
                self.track_solution(step);
            }
            self.history.apply_multiple_steps(self.config.visual.apply_all(&steps));
            self.publish_forward();
        }

        if let Some(err) = failure {
            warn!(steps = steps.len(), error = %err, "solver failed while jumping to the end");
            return Err(err.into());
        }

        debug!(steps = steps.len(), path = self.solution.len(), "solved maze");
        Ok(steps.len())
    }

    /// Patches of the most recent step or undo.
    pub fn current_visual_change(&self) -> Option<&[CellPatch]> {
        self.current_change.as_deref()
    }

    pub fn cell_state(&self, id: &str) -> Option<&CellState> {
        self.history.cell(id)
    }

    pub fn history(&self) -> &CellHistory {
        &self.history
    }

    /// Path cells pulled from the solver so far, start first.
    pub fn solution(&self) -> &[CellId] {
        &self.solution
    }

    /// Bumped whenever the maze is replaced or playback is reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn has_active_solver(&self) -> bool {
        self.solver.is_some()
    }

    fn replace_maze(&mut self, maze: RectMaze) {
        self.maze = Some(maze);
        self.reset_solver_state();
    }

    fn step_backward(&mut self) -> StepOutcome {
        let Some(step) = self.history.history_current_step() else {
            return StepOutcome::AtStart;
        };

        self.current_change = Some(step.backward.clone());
        self.history.undo();
        trace!(index = self.history.history_index(), "stepped backward");
        StepOutcome::Stepped
    }

    fn step_forward(&mut self) -> Result<StepOutcome> {
        if self.history.can_redo() {
            self.history.redo();
            self.publish_forward();
            trace!(index = self.history.history_index(), "replayed step");
            return Ok(StepOutcome::Stepped);
        }

        self.ensure_solver(AlgoFeature::SteppedExecution)?;
        let (Some(maze), Some(solver)) = (self.maze.as_ref(), self.solver.as_mut()) else {
            return Err(Error::NoMaze);
        };

        let step = match solver.resume(maze) {
            Some(step) => step?,
            None => return Ok(StepOutcome::Exhausted),
        };

        self.track_solution(&step);
        self.history.apply_step(self.config.visual.apply_visual(&step));
        self.publish_forward();
        trace!(
            index = self.history.history_index(),
            cell = %step.cell(),
            "pulled solver step"
        );
        Ok(StepOutcome::Stepped)
    }

    /// Start the selected solver unless one is already running.
    ///
    /// Every reset drops the running solver, so one that exists was started
    /// against the current maze and endpoints.
    fn ensure_solver(&mut self, feature: AlgoFeature) -> Result<()> {
        let entry = self.solvers.by_id(self.solver_id)?;
        entry.require(feature)?;
        if self.solver.is_some() {
            return Ok(());
        }

        let maze = self.maze.as_ref().ok_or(Error::NoMaze)?;
        let solver = entry
            .kind
            .start(self.start.clone(), self.end.clone(), maze, self.config.heuristic)?;

        debug!(solver = solver.name(), start = %self.start, end = %self.end, "started solver");
        self.solver = Some(solver);
        Ok(())
    }

    fn track_solution(&mut self, step: &SolutionStep) {
        if let SolutionStep::Path { found_path, .. } = step {
            if self.solution.is_empty() {
                self.solution.push(self.start.clone());
            }
            self.solution.push(found_path.clone());
        }
    }

    fn publish_forward(&mut self) {
        self.current_change = self
            .history
            .history_current_step()
            .map(|step| step.forward.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_solve::keys;

    fn config() -> SessionConfig {
        SessionConfig {
            rows: 5,
            cols: 6,
            seed: Some(11),
            ..SessionConfig::default()
        }
    }

    fn generated() -> MazeSession {
        let mut session = MazeSession::new(config()).unwrap();
        session.generate_maze().unwrap();
        session
    }

    #[test]
    fn new_session_has_no_maze() {
        let mut session = MazeSession::new(config()).unwrap();

        assert!(session.maze().is_none());
        assert!(matches!(session.take_step(TimeDirection::Forward), Err(Error::NoMaze)));
        assert!(matches!(session.select_cell("0,0"), Err(Error::NoMaze)));
    }

    #[test]
    fn unknown_config_names_are_rejected() {
        let bad_solver = SessionConfig {
            solver_id: 9,
            ..config()
        };
        assert!(matches!(MazeSession::new(bad_solver), Err(Error::UnknownSolver(_))));

        let bad_generator = SessionConfig {
            generator: "prim".into(),
            ..config()
        };
        assert!(matches!(MazeSession::new(bad_generator), Err(Error::UnknownGenerator(_))));
    }

    #[test]
    fn init_maze_puts_end_in_the_corner() {
        let mut session = MazeSession::new(config()).unwrap();
        session.init_maze(12.5).unwrap();

        let maze = session.maze().unwrap();
        assert_eq!(maze.cell_size(), 12.5);
        assert_eq!(maze.open_edge_count(), 0);
        assert_eq!(session.end().as_str(), "4,5");
        assert_eq!(session.start().as_str(), "0,0");
    }

    #[test]
    fn generate_maze_keeps_cell_size_and_carves_a_tree() {
        let mut session = MazeSession::new(config()).unwrap();
        session.init_maze(12.5).unwrap();
        session.generate_maze().unwrap();

        let maze = session.maze().unwrap();
        assert_eq!(maze.cell_size(), 12.5);
        assert_eq!(maze.open_edge_count(), 5 * 6 - 1);
    }

    #[test]
    fn dimension_setters_validate_against_bounds() {
        let mut session = MazeSession::new(config()).unwrap();

        assert!(session.set_rows(4).is_err());
        assert!(session.set_cols(101).is_err());
        session.set_rows(7).unwrap();
        session.set_cols(8).unwrap();
        assert_eq!((session.rows(), session.cols()), (7, 8));
    }

    #[test]
    fn shrinking_moves_endpoints_back_inside() {
        let mut session = generated();
        session.set_cell_selection(CellSelection::Start);
        assert!(session.select_cell("4,5").unwrap());

        session.set_rows(5).unwrap();
        session.set_cols(5).unwrap();
        session.generate_maze().unwrap();

        assert_eq!(session.start().as_str(), "0,0");
        assert_eq!(session.end().as_str(), "4,4");
    }

    #[test]
    fn select_cell_follows_the_mode() {
        let mut session = generated();

        assert!(!session.select_cell("2,2").unwrap());

        session.set_cell_selection(CellSelection::End);
        assert!(session.select_cell("2,2").unwrap());
        assert_eq!(session.end().as_str(), "2,2");
        assert!(!session.select_cell("2,2").unwrap());

        assert!(matches!(session.select_cell("9,9"), Err(Error::UnknownCell(_))));
    }

    #[test]
    fn forward_steps_record_history() {
        let mut session = generated();

        assert_eq!(session.take_step(TimeDirection::Forward).unwrap(), StepOutcome::Stepped);
        assert!(session.has_active_solver());
        assert_eq!(session.history().history_index(), 0);

        let change = session.current_visual_change().unwrap();
        let visited = change.last().unwrap();
        assert_eq!(visited.id().as_str(), "0,0");
        assert_eq!(
            session.cell_state("0,0").unwrap().get_str(keys::COLOR),
            Some(session.config().visual.visited.background.as_str())
        );
    }

    #[test]
    fn backward_publishes_the_inverse() {
        let mut session = generated();
        session.take_step(TimeDirection::Forward).unwrap();

        assert_eq!(session.take_step(TimeDirection::Backward).unwrap(), StepOutcome::Stepped);
        assert!(session.history().get_state().is_empty());
        assert!(session
            .current_visual_change()
            .unwrap()
            .iter()
            .all(CellPatch::is_delete));

        assert_eq!(session.take_step(TimeDirection::Backward).unwrap(), StepOutcome::AtStart);
    }

    #[test]
    fn backward_at_start_follows_policy() {
        let mut session = generated();
        assert!(session.take_step_in_solution(TimeDirection::Backward).unwrap());

        let mut strict = MazeSession::new(SessionConfig {
            backward_at_start: BackwardAtStart::Fail,
            ..config()
        })
        .unwrap();
        strict.generate_maze().unwrap();
        assert!(!strict.take_step_in_solution(TimeDirection::Backward).unwrap());
    }

    #[test]
    fn switching_solver_resets_playback() {
        let mut session = generated();
        session.take_step(TimeDirection::Forward).unwrap();
        let epoch = session.epoch();

        session.set_solver_id(0).unwrap();
        assert_eq!(session.epoch(), epoch);

        session.set_solver_id(1).unwrap();
        assert!(session.epoch() > epoch);
        assert!(!session.has_active_solver());
        assert!(session.history().is_empty());
        assert!(session.current_visual_change().is_none());
        assert_eq!(session.solver_name(), "breadth first search");
    }

    #[test]
    fn solver_without_stepping_is_refused() {
        let mut solvers = SolverRegistry::default();
        let mut entry = crate::SolverEntry::new(0, labyrinth_solve::SolverKind::AStar);
        entry.features = vec![AlgoFeature::JumpToFinal];
        solvers.register(entry);

        let mut session =
            MazeSession::with_registries(config(), solvers, GeneratorRegistry::default()).unwrap();
        session.generate_maze().unwrap();

        assert!(matches!(
            session.take_step(TimeDirection::Forward),
            Err(Error::Unsupported { .. })
        ));
        assert!(session.solve_maze().unwrap() > 0);
    }

    #[test]
    fn closed_grid_reports_isolated_start() {
        let mut session = MazeSession::new(config()).unwrap();
        session.init_maze(10.0).unwrap();
        session.set_solver_id(1).unwrap();

        assert!(matches!(
            session.take_step(TimeDirection::Forward),
            Err(Error::Solver(labyrinth_solve::Error::IsolatedCell(_)))
        ));
    }

    #[test]
    fn moving_an_endpoint_restarts_the_solver_from_it() {
        let mut session = generated();
        session.take_step(TimeDirection::Forward).unwrap();
        session.take_step(TimeDirection::Forward).unwrap();
        assert!(session.has_active_solver());

        session.set_start(CellId::rect(2, 3));
        assert!(!session.has_active_solver());

        assert_eq!(session.take_step(TimeDirection::Forward).unwrap(), StepOutcome::Stepped);
        assert_eq!(session.history().len(), 1);
        assert!(session.cell_state("2,3").is_some());
        assert!(session.cell_state("0,0").is_none());

        while session.take_step_in_solution(TimeDirection::Forward).unwrap() {}
        assert_eq!(session.solution().first().map(CellId::as_str), Some("2,3"));
    }

    #[test]
    fn failed_solve_keeps_the_steps_already_drained() {
        let mut session = MazeSession::new(config()).unwrap();
        session.init_maze(10.0).unwrap();

        // A* expands the walled-in start once, then runs out of open cells.
        assert!(matches!(
            session.solve_maze(),
            Err(Error::Solver(labyrinth_solve::Error::Unreachable { .. }))
        ));
        assert_eq!(session.history().len(), 1);
        assert!(session.cell_state("0,0").is_some());
        assert!(session.current_visual_change().is_some());
    }

    #[test]
    fn time_direction_parses() {
        assert_eq!("Forward".parse::<TimeDirection>().unwrap(), TimeDirection::Forward);
        assert_eq!(" backward ".parse::<TimeDirection>().unwrap(), TimeDirection::Backward);
        assert!("sideways".parse::<TimeDirection>().is_err());
        assert_eq!(TimeDirection::Backward.to_string(), "backward");
    }
}
