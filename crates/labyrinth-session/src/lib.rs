//! Labyrinth Session
//!
//! Drives a maze from generation through stepped solving, with undo/redo
//! playback over the solver's visual changes.
//!
//! # Architecture
//!
//! - **Registries**: solvers by id and generators by name, handed to the
//!   session at construction
//! - **Session**: owns the maze, the active solver and the cell history
//! - **AutoPlay**: steps a session forward on a tokio timer until the solver
//!   runs dry or the session is reset
//!
//! # Usage
//!
//! ```ignore
//! let mut session = MazeSession::new(SessionConfig::default())?;
//! session.generate_maze()?;
//!
//! while session.take_step_in_solution(TimeDirection::Forward)? {
//!     render(session.current_visual_change());
//! }
//! ```

mod autoplay;
mod config;
mod error;
mod registry;
mod session;

pub use autoplay::{AutoPlay, PlaybackState, PlaybackStatus};
pub use config::{BackwardAtStart, SessionConfig};
pub use error::{Error, Result};
pub use registry::{AlgoFeature, GeneratorEntry, GeneratorRegistry, SolverEntry, SolverRegistry};
pub use session::{CellSelection, MazeSession, StepOutcome, TimeDirection};
