//! Neighbor derivation: fixed offset templates resolved through a grid's
//! topology.
//!
//! Hex offsets use the same odd-row layout as the hexagon outline in
//! [`crate::geometry`]: odd rows sit half a column to the right, which
//! flips the column component of the diagonal offsets by row parity.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// North, east, south, west.
const CARDINAL: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// All eight surrounding cells.
const ADJACENT: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The six hex neighbors of a cell on an even row.
const HEX_EVEN: [(isize, isize); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// The six hex neighbors of a cell on an odd row.
const HEX_ODD: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// The offset pattern defining which cells count as neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    /// The four orthogonal cells.
    Cardinal,
    /// The eight surrounding cells.
    #[default]
    Adjacent,
    /// The six cells around a hexagon, by row parity.
    Hex,
}

impl Neighborhood {
    /// The raw offset template for a cell on the given row.
    pub fn template(self, row: usize) -> &'static [(isize, isize)] {
        match self {
            Neighborhood::Cardinal => &CARDINAL,
            Neighborhood::Adjacent => &ADJACENT,
            Neighborhood::Hex => {
                if row % 2 == 1 {
                    &HEX_ODD
                } else {
                    &HEX_EVEN
                }
            }
        }
    }

    /// Neighbor flat indices of (row, col), resolved through the grid's
    /// topology. Bounded grids drop offsets that land outside; wrapped
    /// grids keep every template entry.
    pub fn resolve(self, grid: &Grid, row: usize, col: usize) -> Vec<usize> {
        self.template(row)
            .iter()
            .filter_map(|&(dr, dc)| {
                grid.normalize(row as isize + dr, col as isize + dc)
                    .map(|(r, c)| grid.index(r, c))
            })
            .collect()
    }

    /// Precompute the neighbor indices of every cell.
    ///
    /// Built once per simulation: dimensions and topology are fixed for
    /// its lifetime, so resets reuse the cache unchanged.
    pub fn build_cache(self, grid: &Grid) -> Vec<Vec<usize>> {
        (0..grid.len())
            .map(|index| {
                let (row, col) = grid.row_col(index);
                self.resolve(grid, row, col)
            })
            .collect()
    }
}
