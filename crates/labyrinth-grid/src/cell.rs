//! Polygon cells.
//!
//! A cell is a regular polygon described by a [`CellShape`]. All shapes share
//! one wall generator: starting at the origin vertex, walk `sides - 1` edges of
//! `edge_length`, turning by the shape's exterior angle after each, then close
//! the loop back to the origin. Because every cell is traced in the same
//! rotational order, the wall two neighbours share is the same segment with
//! opposite direction.

use crate::{circle_point, CellId, Error, Point2d, Result, Wall};

/// Direction in which a polygon is traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Shape of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellShape {
    /// Four walls, traced right, down, left, up.
    Square,
    /// Six walls.
    Hexagon { rotation: Rotation },
}

impl CellShape {
    /// Number of walls a cell of this shape has.
    pub const fn number_of_walls(&self) -> usize {
        match self {
            CellShape::Square => 4,
            CellShape::Hexagon { .. } => 6,
        }
    }

    /// Turn applied after each edge, in degrees.
    pub const fn turn_angle(&self) -> f64 {
        match self {
            CellShape::Square => 90.0,
            CellShape::Hexagon {
                rotation: Rotation::Clockwise,
            } => 60.0,
            CellShape::Hexagon {
                rotation: Rotation::CounterClockwise,
            } => -60.0,
        }
    }
}

/// A polygon cell: identity, geometry and open neighbours.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonCell {
    id: CellId,
    shape: CellShape,
    edge_length: f64,
    walls: Vec<Wall>,
    /// Ids of cells reachable through a hidden wall.
    ///
    /// Filled by [`fill_cells_with_open_neighbors`](crate::fill_cells_with_open_neighbors).
    pub neighbors: Vec<CellId>,
}

impl PolygonCell {
    /// Create a cell without walls. Call [`generate_walls`](Self::generate_walls)
    /// to place it on the canvas.
    pub fn new(id: impl Into<CellId>, shape: CellShape, edge_length: f64) -> Result<Self> {
        validate_edge_length(edge_length)?;

        Ok(Self {
            id: id.into(),
            shape,
            edge_length,
            walls: Vec::with_capacity(shape.number_of_walls()),
            neighbors: Vec::new(),
        })
    }

    /// Square cell.
    pub fn square(id: impl Into<CellId>, edge_length: f64) -> Result<Self> {
        Self::new(id, CellShape::Square, edge_length)
    }

    /// Hexagon cell.
    pub fn hexagon(id: impl Into<CellId>, edge_length: f64, rotation: Rotation) -> Result<Self> {
        Self::new(id, CellShape::Hexagon { rotation }, edge_length)
    }

    pub fn id(&self) -> &CellId {
        &self.id
    }

    pub fn shape(&self) -> CellShape {
        self.shape
    }

    pub fn number_of_walls(&self) -> usize {
        self.shape.number_of_walls()
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Change the edge length. Existing walls keep their geometry until the
    /// next [`generate_walls`](Self::generate_walls).
    pub fn set_edge_length(&mut self, edge_length: f64) -> Result<()> {
        validate_edge_length(edge_length)?;
        self.edge_length = edge_length;
        Ok(())
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn walls_mut(&mut self) -> &mut [Wall] {
        &mut self.walls
    }

    /// Trace the polygon starting at `origin`. Previous walls are discarded.
    pub fn generate_walls(&mut self, origin: Point2d) {
        let sides = self.shape.number_of_walls();
        let turn = self.shape.turn_angle();

        self.walls.clear();

        let mut prev = origin;
        let mut angle = 0.0;

        // the origin vertex already exists, so one edge fewer than sides
        for _ in 1..sides {
            let (dx, dy) = circle_point(self.edge_length, angle, false);
            let next = prev.offset(dx, dy);
            angle += turn;
            self.walls.push(Wall::new(prev, next));
            prev = next;
        }

        self.walls.push(Wall::new(prev, origin));
    }

    /// Polygon vertices (the start point of every wall).
    pub fn points(&self) -> Vec<Point2d> {
        self.walls.iter().map(Wall::start).collect()
    }

    /// Mean of the vertices. `None` before walls are generated.
    pub fn center(&self) -> Option<Point2d> {
        Point2d::mean(self.walls.iter().map(Wall::start))
    }

    /// Whether any wall of this cell is hidden.
    pub fn has_opening(&self) -> bool {
        self.walls.iter().any(|w| !w.is_visible())
    }
}

fn validate_edge_length(edge_length: f64) -> Result<()> {
    if edge_length.is_finite() && edge_length > 0.0 {
        Ok(())
    } else {
        Err(Error::NonPositiveEdgeLength(edge_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_edge() {
        assert_eq!(
            PolygonCell::square("1", 0.0).unwrap_err(),
            Error::NonPositiveEdgeLength(0.0)
        );
        assert!(PolygonCell::square("1", -2.0).is_err());
        assert!(PolygonCell::square("1", f64::NAN).is_err());
    }

    #[test]
    fn regenerating_replaces_walls() {
        let mut cell = PolygonCell::square("1", 2.0).unwrap();
        assert!(cell.walls().is_empty());

        for _ in 0..2 {
            cell.generate_walls(Point2d::ORIGIN);
            assert_eq!(cell.walls().len(), cell.number_of_walls());
        }
    }

    #[test]
    fn square_center() {
        let mut cell = PolygonCell::square("1", 2.0).unwrap();
        assert_eq!(cell.center(), None);

        cell.generate_walls(Point2d::ORIGIN);
        assert_eq!(cell.center(), Some(Point2d::new(1.0, 1.0)));
    }

    #[test]
    fn square_vertices_in_drawing_order() {
        let mut cell = PolygonCell::square("1", 2.0).unwrap();
        cell.generate_walls(Point2d::new(4.0, 6.0));

        assert_eq!(
            cell.points(),
            vec![
                Point2d::new(4.0, 6.0),
                Point2d::new(6.0, 6.0),
                Point2d::new(6.0, 8.0),
                Point2d::new(4.0, 8.0),
            ]
        );
    }

    #[test]
    fn adjacent_squares_share_reversed_wall() {
        let mut left = PolygonCell::square("0,0", 2.0).unwrap();
        let mut right = PolygonCell::square("0,1", 2.0).unwrap();
        left.generate_walls(Point2d::ORIGIN);
        right.generate_walls(Point2d::new(2.0, 0.0));

        let shared: Vec<_> = left
            .walls()
            .iter()
            .filter(|a| right.walls().iter().any(|b| a.is_same_wall(b)))
            .collect();

        assert_eq!(shared.len(), 1);
        assert!(right.walls().iter().any(|b| b.key() == shared[0].reversed_key()));
    }

    #[test]
    fn hexagon_closes_loop() {
        for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let mut cell = PolygonCell::hexagon("h", 3.0, rotation).unwrap();
            cell.generate_walls(Point2d::new(10.0, 10.0));

            let walls = cell.walls();
            assert_eq!(walls.len(), 6);
            for pair in walls.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
            }
            assert_eq!(walls[5].end(), walls[0].start());
        }
    }
}
