//! Distance estimates between cell centres.

use std::fmt;
use std::str::FromStr;

use labyrinth_grid::Point2d;

use crate::Error;

/// Heuristic used by A* to estimate the remaining distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// `|dx| + |dy|`
    #[default]
    Manhattan,
    /// Straight-line distance.
    Euclidean,
    /// `max(|dx|, |dy|)`
    Chebyshev,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] =
        [Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Chebyshev];

    pub fn distance(self, a: Point2d, b: Point2d) -> f64 {
        let dx = (a.x() - b.x()).abs();
        let dy = (a.y() - b.y()).abs();

        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => dx.hypot(dy),
            Heuristic::Chebyshev => dx.max(dy),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Chebyshev => "chebyshev",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownHeuristic(s.to_owned()))
    }
}
