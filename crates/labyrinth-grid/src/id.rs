//! Cell identifiers.

use std::borrow::Borrow;

/// Separator between row and column in rectangular cell ids.
pub const CELL_ID_DELIMITER: char = ',';

/// Identity of a cell. Rectangular grids use `"row,col"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellId(String);

impl CellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the cell at `(row, col)` in a rectangular grid.
    pub fn rect(row: usize, col: usize) -> Self {
        Self(format!("{row}{CELL_ID_DELIMITER}{col}"))
    }

    /// Parse a rectangular id back into `(row, col)`.
    pub fn rect_position(&self) -> Option<(usize, usize)> {
        let (row, col) = self.0.split_once(CELL_ID_DELIMITER)?;
        Some((row.parse().ok()?, col.parse().ok()?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for CellId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<CellId> for String {
    fn from(value: CellId) -> Self {
        value.0
    }
}

impl Borrow<str> for CellId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CellId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
