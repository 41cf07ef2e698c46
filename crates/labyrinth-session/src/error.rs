//! Error types for labyrinth-session.

use labyrinth_grid::CellId;
use thiserror::Error;

use crate::AlgoFeature;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a maze session.
#[derive(Debug, Error)]
pub enum Error {
    /// Building or carving the grid failed.
    #[error("grid error: {0}")]
    Grid(#[from] labyrinth_grid::Error),

    /// The maze generator rejected its input.
    #[error("generator error: {0}")]
    Generator(#[from] labyrinth_gen::Error),

    /// The solver hit inconsistent maze data.
    #[error("solver error: {0}")]
    Solver(#[from] labyrinth_solve::Error),

    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No solver is registered under this id or name.
    #[error("there's no solver {0}")]
    UnknownSolver(String),

    /// No generator is registered under this name.
    #[error("there's no generator named {0:?}")]
    UnknownGenerator(String),

    /// The registered algorithm lacks the requested feature.
    #[error("{algorithm} does not support {feature:?}")]
    Unsupported {
        algorithm: String,
        feature: AlgoFeature,
    },

    /// An operation needs a maze but none was built yet.
    #[error("no maze has been created")]
    NoMaze,

    /// The selected cell is not part of the maze.
    #[error("cell {0} is not in the maze")]
    UnknownCell(CellId),
}
