//! Labyrinth Grid Model
//!
//! Polygon cells on a canvas plane, the walls between them, and rectangular
//! mazes built from square cells.
//!
//! # Geometry
//!
//! Coordinates are quantized to two decimal places at construction
//! ([`Point2d`]). Walls of neighbouring cells are matched by coordinates,
//! undirected, so removing "the wall between two cells" is a geometric
//! lookup rather than bookkeeping of shared objects.
//!
//! # Adjacency
//!
//! A freshly built grid has every wall visible and no neighbours. Generators
//! decide which walls to hide; [`fill_cells_with_open_neighbors`] then derives
//! each cell's `neighbors` from its hidden walls. Solvers only read the
//! resulting adjacency through [`CellLookup`].

mod cell;
mod error;
mod id;
mod maze;
mod neighbors;
mod point;
mod wall;

pub use cell::{CellShape, PolygonCell, Rotation};
pub use error::{Error, Result};
pub use id::{CellId, CELL_ID_DELIMITER};
pub use maze::{
    create_cell_finder, create_rect_maze, remove_wall_between_cells, remove_walls_between_cells,
    CellFinder, CellLookup, CellPair, GridBounds, RectMaze,
};
pub use neighbors::{fill_cells_with_open_neighbors, wall_to_open_neighbors};
pub use point::{circle_point, Point2d, FRACTION_DIGITS};
pub use wall::{Wall, WallKey};

/// Default number of rows for a new maze.
pub const DEFAULT_ROWS: usize = 20;

/// Default number of columns for a new maze.
pub const DEFAULT_COLUMNS: usize = 29;

/// Smallest accepted row count.
pub const MIN_ROWS: usize = 5;

/// Largest accepted row count.
pub const MAX_ROWS: usize = 100;

/// Smallest accepted column count.
pub const MIN_COLUMNS: usize = 5;

/// Largest accepted column count.
pub const MAX_COLUMNS: usize = 100;

const _: () = assert!(MIN_ROWS <= DEFAULT_ROWS && DEFAULT_ROWS <= MAX_ROWS);
const _: () = assert!(MIN_COLUMNS <= DEFAULT_COLUMNS && DEFAULT_COLUMNS <= MAX_COLUMNS);
