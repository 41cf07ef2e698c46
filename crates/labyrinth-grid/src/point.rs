//! Quantized 2D points.
//!
//! Every coordinate is rounded to [`FRACTION_DIGITS`] decimal places at
//! construction and stored as an integer number of hundredths. Two points
//! produced by different float paths that round to the same value compare
//! equal and hash identically, which is what lets walls of neighbouring cells
//! be matched by geometry instead of by reference.

use std::ops::{Add, Sub};

/// Decimal places kept for every coordinate.
pub const FRACTION_DIGITS: u32 = 2;

const SCALE: f64 = 100.0;

/// A point on the canvas plane (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawPoint", into = "RawPoint"))]
pub struct Point2d {
    x: i64,
    y: i64,
}

impl Point2d {
    /// Origin of the canvas.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a point, rounding both coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: quantize(x),
            y: quantize(y),
        }
    }

    /// Horizontal coordinate.
    pub fn x(&self) -> f64 {
        self.x as f64 / SCALE
    }

    /// Vertical coordinate.
    pub fn y(&self) -> f64 {
        self.y as f64 / SCALE
    }

    /// Point displaced by `(dx, dy)`, rounded again.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x() + dx, self.y() + dy)
    }

    /// Mean of a set of points, or `None` for an empty set.
    pub fn mean<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2d>,
    {
        let (sum_x, sum_y, count) = points
            .into_iter()
            .fold((0.0, 0.0, 0usize), |(sx, sy, n), p| (sx + p.x(), sy + p.y(), n + 1));

        if count == 0 {
            return None;
        }
        Some(Self::new(sum_x / count as f64, sum_y / count as f64))
    }
}

fn quantize(value: f64) -> i64 {
    (value * SCALE).round() as i64
}

/// Point on a circle of radius `r` around the origin.
///
/// `theta` is in degrees, measured from the positive x axis towards positive
/// y. With `clockwise` the angle is negated first.
pub fn circle_point(r: f64, theta: f64, clockwise: bool) -> (f64, f64) {
    let theta = if clockwise { -theta } else { theta };
    let radians = theta.to_radians();
    (r * radians.cos(), r * radians.sin())
}

impl Add for Point2d {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point2d {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::fmt::Display for Point2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x(), self.y())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

#[cfg(feature = "serde")]
impl From<RawPoint> for Point2d {
    fn from(raw: RawPoint) -> Self {
        Point2d::new(raw.x, raw.y)
    }
}

#[cfg(feature = "serde")]
impl From<Point2d> for RawPoint {
    fn from(point: Point2d) -> Self {
        RawPoint {
            x: point.x(),
            y: point.y(),
        }
    }
}
