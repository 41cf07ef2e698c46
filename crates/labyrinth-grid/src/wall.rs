//! Wall segments between cells.

use crate::Point2d;

/// Directed key of a wall segment: `(start, end)`.
pub type WallKey = (Point2d, Point2d);

/// A boundary segment of a cell.
///
/// Walls are compared undirected: two walls are the same wall when their
/// endpoints match in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    start: Point2d,
    end: Point2d,
    visible: bool,
}

impl Wall {
    /// Create a visible wall from `start` to `end`.
    pub const fn new(start: Point2d, end: Point2d) -> Self {
        Self {
            start,
            end,
            visible: true,
        }
    }

    pub fn start(&self) -> Point2d {
        self.start
    }

    pub fn end(&self) -> Point2d {
        self.end
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the wall. A hidden wall is a passage.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Undirected segment equality.
    pub fn is_same_wall(&self, other: &Wall) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }

    /// Key in drawing direction.
    pub fn key(&self) -> WallKey {
        (self.start, self.end)
    }

    /// Key in the opposite direction, as seen from the neighbouring cell.
    pub fn reversed_key(&self) -> WallKey {
        (self.end, self.start)
    }
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> Wall {
        Wall::new(Point2d::new(x1, y1), Point2d::new(x2, y2))
    }

    #[test]
    fn same_wall_by_coordinates() {
        let a = wall(30.0, 40.0, 15.0, 17.0);
        let b = wall(30.0, 40.0, 15.0, 17.0);
        let c = wall(27.0, 37.0, 15.0, 17.0);

        assert!(a.is_same_wall(&b));
        assert!(!a.is_same_wall(&c));
    }

    #[test]
    fn opposite_orientation_is_same_wall() {
        let a = wall(30.0, 40.0, 15.0, 17.0);
        let b = wall(15.0, 17.0, 30.0, 40.0);

        assert!(a.is_same_wall(&b));
        assert_eq!(a.key(), b.reversed_key());
    }

    #[test]
    fn new_walls_are_visible() {
        let mut w = wall(0.0, 0.0, 1.0, 0.0);
        assert!(w.is_visible());

        w.set_visible(false);
        assert!(!w.is_visible());
    }

    #[test]
    fn display_lists_endpoints() {
        assert_eq!(wall(0.0, 0.5, 2.0, 0.5).to_string(), "0 0.5 2 0.5");
    }
}
