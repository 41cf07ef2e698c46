//! Session configuration.

use labyrinth_grid::{GridBounds, DEFAULT_COLUMNS, DEFAULT_ROWS};
use labyrinth_solve::{Heuristic, VisualSchema};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What a backward step reports when there is nothing to undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackwardAtStart {
    /// Report success, as if a step was taken.
    #[default]
    Succeed,
    /// Report failure, so callers can tell nothing happened.
    Fail,
}

/// Everything a session needs besides its registries.
///
/// Missing fields fall back to [`SessionConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Edge length of a square cell on the canvas.
    pub cell_size: f64,
    pub bounds: GridBounds,
    /// Fixed seed for reproducible mazes; entropy when absent.
    pub seed: Option<u64>,
    /// Registered generator name.
    pub generator: String,
    /// Registered solver id.
    pub solver_id: u32,
    pub heuristic: Heuristic,
    pub visual: VisualSchema,
    pub backward_at_start: BackwardAtStart,
    /// Delay between auto-play steps.
    pub autoplay_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLUMNS,
            cell_size: 20.0,
            bounds: GridBounds::default(),
            seed: None,
            generator: labyrinth_gen::GeneratorKind::default().name().to_owned(),
            solver_id: 0,
            heuristic: Heuristic::default(),
            visual: VisualSchema::default(),
            backward_at_start: BackwardAtStart::default(),
            autoplay_delay_ms: 0,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        if b.min_rows == 0 || b.min_rows > b.max_rows || b.min_cols == 0 || b.min_cols > b.max_cols
        {
            return Err(Error::InvalidConfig(format!("empty grid bounds {b:?}")));
        }
        b.validate(self.rows, self.cols)?;

        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }
}
