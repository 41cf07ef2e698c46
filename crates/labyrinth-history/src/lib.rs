//! Cell History
//!
//! Keeps the visual state of maze cells (colours, path markers, inline text)
//! as a sequence of patch steps with a cursor, so playback can move forward
//! and backward through a solver run one step at a time.
//!
//! # Steps
//!
//! [`CellHistory::apply_step`] folds its patches into one per cell, records
//! the pre-step state of every touched cell as the backward half, then
//! applies the forward half. Undo replays the backward half, redo the
//! forward half. Backward patches are full snapshots, so an undo right after
//! a step restores the previous state field for field.
//!
//! The history only knows cell ids and values. It never reads maze geometry.

mod history;
mod patch;

pub use history::{CellHistory, HistoryStep, StateMap};
pub use patch::{CellPatch, CellState, Fields};
