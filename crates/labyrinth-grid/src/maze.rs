//! Rectangular mazes, cell lookup and wall removal.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    fill_cells_with_open_neighbors, CellId, Error, PolygonCell, Point2d, Result, MAX_COLUMNS,
    MAX_ROWS, MIN_COLUMNS, MIN_ROWS,
};

/// A pair of cells whose shared wall becomes a passage.
pub type CellPair = (CellId, CellId);

/// Accepted grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridBounds {
    pub min_rows: usize,
    pub max_rows: usize,
    pub min_cols: usize,
    pub max_cols: usize,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            min_rows: MIN_ROWS,
            max_rows: MAX_ROWS,
            min_cols: MIN_COLUMNS,
            max_cols: MAX_COLUMNS,
        }
    }
}

impl GridBounds {
    /// Check `rows` and `cols` against the bounds.
    pub fn validate(&self, rows: usize, cols: usize) -> Result<()> {
        if rows < self.min_rows || rows > self.max_rows {
            return Err(Error::RowsOutOfRange {
                value: rows,
                min: self.min_rows,
                max: self.max_rows,
            });
        }
        if cols < self.min_cols || cols > self.max_cols {
            return Err(Error::ColumnsOutOfRange {
                value: cols,
                min: self.min_cols,
                max: self.max_cols,
            });
        }
        Ok(())
    }

    /// Clamp a dimension pair into the bounds.
    pub fn clamp(&self, rows: usize, cols: usize) -> (usize, usize) {
        (
            rows.clamp(self.min_rows, self.max_rows),
            cols.clamp(self.min_cols, self.max_cols),
        )
    }
}

/// Read access to cells by id.
///
/// Solvers only ever need this view of a maze. A miss is `None`, never an
/// error.
pub trait CellLookup {
    fn cell(&self, id: &str) -> Option<&PolygonCell>;
}

impl CellLookup for HashMap<CellId, PolygonCell> {
    fn cell(&self, id: &str) -> Option<&PolygonCell> {
        self.get(id)
    }
}

/// Id index over a borrowed slice of cells.
#[derive(Debug, Clone)]
pub struct CellFinder<'a> {
    cells: &'a [PolygonCell],
    index: HashMap<&'a str, usize>,
}

impl<'a> CellFinder<'a> {
    /// Index `cells` once. Later ids win on duplicates.
    pub fn new(cells: &'a [PolygonCell]) -> Self {
        let index = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (cell.id().as_str(), i))
            .collect();
        Self { cells, index }
    }

    pub fn find(&self, id: &str) -> Option<&'a PolygonCell> {
        self.index.get(id).map(|&i| &self.cells[i])
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl CellLookup for CellFinder<'_> {
    fn cell(&self, id: &str) -> Option<&PolygonCell> {
        self.find(id)
    }
}

/// Build a lookup over `cells`.
pub fn create_cell_finder(cells: &[PolygonCell]) -> CellFinder<'_> {
    CellFinder::new(cells)
}

/// Hide the wall shared by two cells.
///
/// Cells that share no wall are left untouched.
pub fn remove_wall_between_cells(
    first: &mut PolygonCell,
    second: &mut PolygonCell,
) -> Result<()> {
    let first_count = first.walls().len();
    let second_count = second.walls().len();
    if first_count != second_count {
        return Err(Error::WallCountMismatch {
            first: first_count,
            second: second_count,
        });
    }

    for a in first.walls_mut() {
        if let Some(b) = second.walls_mut().iter_mut().find(|b| a.is_same_wall(b)) {
            a.set_visible(false);
            b.set_visible(false);
        }
    }

    Ok(())
}

/// Hide the walls of every pair. Fails on the first id that is not a cell.
pub fn remove_walls_between_cells(
    cells: &mut [PolygonCell],
    pairs: &[CellPair],
) -> Result<()> {
    let index: HashMap<CellId, usize> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.id().clone(), i))
        .collect();

    for (first_id, second_id) in pairs {
        let first = *index
            .get(first_id)
            .ok_or_else(|| Error::CellNotFound(first_id.clone()))?;
        let second = *index
            .get(second_id)
            .ok_or_else(|| Error::CellNotFound(second_id.clone()))?;

        if let Some((a, b)) = pair_mut(cells, first, second) {
            remove_wall_between_cells(a, b)?;
        }
    }

    Ok(())
}

/// Two distinct mutable cells out of one slice.
fn pair_mut(
    cells: &mut [PolygonCell],
    i: usize,
    j: usize,
) -> Option<(&mut PolygonCell, &mut PolygonCell)> {
    use std::cmp::Ordering;

    match i.cmp(&j) {
        Ordering::Equal => None,
        Ordering::Less => {
            let (head, tail) = cells.split_at_mut(j);
            Some((&mut head[i], &mut tail[0]))
        }
        Ordering::Greater => {
            let (head, tail) = cells.split_at_mut(i);
            Some((&mut tail[0], &mut head[j]))
        }
    }
}

/// A `rows × cols` grid of square cells laid out row-major.
#[derive(Debug, Clone)]
pub struct RectMaze {
    rows: usize,
    cols: usize,
    cell_size: f64,
    cells: Vec<PolygonCell>,
    index: HashMap<CellId, usize>,
}

impl RectMaze {
    /// Build a closed grid within the default bounds.
    pub fn new(rows: usize, cols: usize, cell_size: f64) -> Result<Self> {
        Self::with_bounds(&GridBounds::default(), rows, cols, cell_size)
    }

    /// Build a closed grid, validating dimensions against `bounds`.
    ///
    /// Cell `"row,col"` is placed at canvas position
    /// `(col * cell_size, row * cell_size)` with every wall visible.
    pub fn with_bounds(
        bounds: &GridBounds,
        rows: usize,
        cols: usize,
        cell_size: f64,
    ) -> Result<Self> {
        bounds.validate(rows, cols)?;

        let mut cells = Vec::with_capacity(rows * cols);
        let mut index = HashMap::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let id = CellId::rect(row, col);
                let mut cell = PolygonCell::square(id.clone(), cell_size)?;
                cell.generate_walls(Point2d::new(col as f64 * cell_size, row as f64 * cell_size));

                index.insert(id, cells.len());
                cells.push(cell);
            }
        }

        debug!(rows, cols, cell_size, "created rect maze");

        Ok(Self {
            rows,
            cols,
            cell_size,
            cells,
            index,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cells(&self) -> &[PolygonCell] {
        &self.cells
    }

    /// Mutable cells. The slice cannot grow or shrink, so ids stay indexed.
    pub fn cells_mut(&mut self) -> &mut [PolygonCell] {
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&PolygonCell> {
        self.index.get(id).map(|&i| &self.cells[i])
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&PolygonCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Id of the bottom-right cell.
    pub fn last_id(&self) -> CellId {
        CellId::rect(self.rows - 1, self.cols - 1)
    }

    /// Open passages for `pairs`, then recompute every neighbour list.
    pub fn carve(&mut self, pairs: &[CellPair]) -> Result<()> {
        remove_walls_between_cells(&mut self.cells, pairs)?;
        fill_cells_with_open_neighbors(&mut self.cells)
    }

    /// Number of open passages (each counted once).
    pub fn open_edge_count(&self) -> usize {
        self.cells.iter().map(|c| c.neighbors.len()).sum::<usize>() / 2
    }
}

impl CellLookup for RectMaze {
    fn cell(&self, id: &str) -> Option<&PolygonCell> {
        self.find(id)
    }
}

/// Build a closed `rows × cols` grid within the default bounds.
pub fn create_rect_maze(rows: usize, cols: usize, cell_size: f64) -> Result<RectMaze> {
    RectMaze::new(rows, cols, cell_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removed_walls(cell: &PolygonCell) -> Vec<crate::Wall> {
        cell.walls().iter().filter(|w| !w.is_visible()).copied().collect()
    }

    #[test]
    fn creates_row_major_cells() {
        let maze = create_rect_maze(5, 10, 2.0).unwrap();

        assert_eq!(maze.len(), 50);
        assert_eq!(maze.cells()[0].id().as_str(), "0,0");
        assert_eq!(maze.cells()[10].id().as_str(), "1,0");
        assert_eq!(maze.cell_at(4, 9).unwrap().id(), &maze.last_id());
        assert!(maze.cells().iter().all(|c| !c.has_opening()));
    }

    #[test]
    fn ids_are_unique() {
        let maze = create_rect_maze(7, 9, 1.0).unwrap();
        let unique: std::collections::HashSet<_> = maze.cells().iter().map(|c| c.id()).collect();
        assert_eq!(unique.len(), 63);
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert_eq!(
            create_rect_maze(4, 10, 2.0).unwrap_err(),
            Error::RowsOutOfRange { value: 4, min: MIN_ROWS, max: MAX_ROWS }
        );
        assert_eq!(
            create_rect_maze(10, 101, 2.0).unwrap_err(),
            Error::ColumnsOutOfRange { value: 101, min: MIN_COLUMNS, max: MAX_COLUMNS }
        );
        assert!(create_rect_maze(10, 10, 0.0).is_err());
    }

    #[test]
    fn custom_bounds() {
        let bounds = GridBounds { min_rows: 2, max_rows: 3, min_cols: 2, max_cols: 3 };
        assert!(RectMaze::with_bounds(&bounds, 2, 3, 1.0).is_ok());
        assert!(RectMaze::with_bounds(&bounds, 4, 3, 1.0).is_err());
        assert_eq!(bounds.clamp(1, 9), (2, 3));
    }

    #[test]
    fn finder_returns_none_for_unknown_ids() {
        let maze = create_rect_maze(5, 10, 2.0).unwrap();
        let finder = create_cell_finder(maze.cells());

        assert_eq!(finder.find("4,9").unwrap().id().as_str(), "4,9");
        assert!(finder.find("6,11").is_none());
        assert!(maze.cell("6,11").is_none());
    }

    #[test]
    fn removes_wall_between_adjacent_cells() {
        let mut maze = create_rect_maze(5, 10, 2.0).unwrap();
        let pairs = [(CellId::rect(0, 0), CellId::rect(1, 0))];
        remove_walls_between_cells(maze.cells_mut(), &pairs).unwrap();

        let first = removed_walls(maze.find("0,0").unwrap());
        let second = removed_walls(maze.find("1,0").unwrap());
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert!(first[0].is_same_wall(&second[0]));
    }

    #[test]
    fn non_adjacent_cells_are_a_no_op() {
        let mut maze = create_rect_maze(5, 10, 2.0).unwrap();
        let pairs = [
            (CellId::rect(0, 0), CellId::rect(2, 2)),
            (CellId::rect(3, 3), CellId::rect(3, 3)),
        ];
        remove_walls_between_cells(maze.cells_mut(), &pairs).unwrap();

        assert!(maze.cells().iter().all(|c| !c.has_opening()));
    }

    #[test]
    fn unknown_pair_id_fails() {
        let mut maze = create_rect_maze(5, 5, 2.0).unwrap();
        let pairs = [(CellId::rect(0, 0), CellId::rect(9, 9))];

        assert_eq!(
            remove_walls_between_cells(maze.cells_mut(), &pairs).unwrap_err(),
            Error::CellNotFound(CellId::rect(9, 9))
        );
    }

    #[test]
    fn mismatched_shapes_fail() {
        let mut square = PolygonCell::square("s", 1.0).unwrap();
        let mut hexagon = PolygonCell::hexagon("h", 1.0, crate::Rotation::Clockwise).unwrap();
        square.generate_walls(Point2d::ORIGIN);
        hexagon.generate_walls(Point2d::ORIGIN);

        assert_eq!(
            remove_wall_between_cells(&mut square, &mut hexagon).unwrap_err(),
            Error::WallCountMismatch { first: 4, second: 6 }
        );
    }

    #[test]
    fn carve_opens_and_links() {
        let mut maze = create_rect_maze(5, 5, 3.0).unwrap();
        let pairs = [
            (CellId::rect(0, 0), CellId::rect(0, 1)),
            (CellId::rect(0, 1), CellId::rect(1, 1)),
        ];
        maze.carve(&pairs).unwrap();

        assert_eq!(maze.open_edge_count(), 2);
        assert_eq!(maze.find("0,1").unwrap().neighbors.len(), 2);
    }
}
