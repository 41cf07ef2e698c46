//! Open-neighbour computation.
//!
//! Two cells are open neighbours when each has a hidden wall and the two
//! walls are the same segment. Walls are matched through their coordinate
//! keys, trying both directions, so the computation never relies on which
//! cell object a wall belongs to.

use std::collections::HashMap;

use tracing::debug;

use crate::{CellId, Error, PolygonCell, Result, WallKey};

/// Map every hidden wall to the ids of the cells that own it.
///
/// A wall is stored under the key of the first cell that reported it; the
/// neighbouring cell sees the same segment reversed and is appended to that
/// entry.
pub fn wall_to_open_neighbors(cells: &[PolygonCell]) -> HashMap<WallKey, Vec<CellId>> {
    let mut owners: HashMap<WallKey, Vec<CellId>> = HashMap::new();

    for cell in cells {
        for wall in cell.walls().iter().filter(|w| !w.is_visible()) {
            if let Some(ids) = owners.get_mut(&wall.reversed_key()) {
                ids.push(cell.id().clone());
            } else {
                owners.entry(wall.key()).or_default().push(cell.id().clone());
            }
        }
    }

    owners
}

/// Recompute `neighbors` of every cell from its hidden walls.
///
/// Previous neighbour lists are discarded. Fails if a hidden wall is owned by
/// more than two cells, which means the grid geometry is corrupted.
pub fn fill_cells_with_open_neighbors(cells: &mut [PolygonCell]) -> Result<()> {
    let owners = wall_to_open_neighbors(cells);
    let mut links = 0usize;

    for cell in cells.iter_mut() {
        let mut neighbors = Vec::new();

        for wall in cell.walls().iter().filter(|w| !w.is_visible()) {
            let Some(ids) = owners
                .get(&wall.key())
                .or_else(|| owners.get(&wall.reversed_key()))
            else {
                continue;
            };

            if ids.len() > 2 {
                return Err(Error::TooManyWallOwners {
                    wall: wall.to_string(),
                    count: ids.len(),
                });
            }

            if let Some(other) = ids.iter().find(|id| *id != cell.id()) {
                neighbors.push(other.clone());
            }
        }

        links += neighbors.len();
        cell.neighbors = neighbors;
    }

    debug!(cells = cells.len(), open_edges = links / 2, "filled open neighbors");
    Ok(())
}
