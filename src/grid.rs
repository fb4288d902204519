//! Grid storage and topology-aware coordinate handling.

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Payload};
use crate::error::ConfigError;

/// How coordinates past the edge of the grid are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Out-of-range coordinates do not exist; border cells see smaller
    /// neighborhoods.
    #[default]
    Bounded,
    /// Toroidal: coordinates fold back with floor-modulo, so every cell
    /// sees a full neighborhood.
    Wrapped,
}

/// Row-major arrangement of cells, always exactly `width * height` of them.
///
/// The grid owns its cells exclusively; everything outside addresses them
/// by coordinate or flat index (`row * width + col`).
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    topology: Topology,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize, topology: Topology) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            topology,
            cells: vec![Cell::default(); width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of an in-range (row, col).
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// (row, col) of a flat index.
    #[inline]
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.height && col < self.width {
            Some(&self.cells[row * self.width + col])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.height && col < self.width {
            Some(&mut self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Resolve a possibly out-of-range coordinate through the topology.
    ///
    /// Bounded grids reject anything outside `[0, height) x [0, width)`.
    /// Wrapped grids fold every coordinate back in with `rem_euclid`, so a
    /// negative offset lands on the far side.
    #[inline]
    pub fn normalize(&self, row: isize, col: isize) -> Option<(usize, usize)> {
        match self.topology {
            Topology::Bounded => {
                if (0..self.height as isize).contains(&row)
                    && (0..self.width as isize).contains(&col)
                {
                    Some((row as usize, col as usize))
                } else {
                    None
                }
            }
            Topology::Wrapped => Some((
                row.rem_euclid(self.height as isize) as usize,
                col.rem_euclid(self.width as isize) as usize,
            )),
        }
    }

    /// Row-major pass over the cells. Restartable: every call starts a
    /// fresh iteration over the committed snapshot.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Committed states in row-major order.
    pub fn states(&self) -> Vec<i32> {
        self.cells.iter().map(Cell::state).collect()
    }

    /// Replace every cell's committed state, clearing payloads and staged
    /// updates. Fails without touching the grid if the list length does
    /// not match.
    pub fn load_states(&mut self, states: &[i32]) -> Result<(), ConfigError> {
        if states.len() != self.cells.len() {
            return Err(ConfigError::StateCountMismatch {
                expected: self.cells.len(),
                actual: states.len(),
            });
        }
        for (cell, &state) in self.cells.iter_mut().zip(states) {
            cell.overwrite(state, Payload::None);
        }
        Ok(())
    }

    /// First cell with no staged next state, if any.
    pub fn first_uncomputed(&self) -> Option<usize> {
        self.cells.iter().position(|cell| !cell.has_next())
    }

    /// Promote every staged update at once.
    pub fn commit_all(&mut self) {
        for cell in &mut self.cells {
            cell.commit();
        }
    }

    /// Drop every staged update, leaving the last committed generation.
    pub fn clear_pending(&mut self) {
        for cell in &mut self.cells {
            cell.clear_pending();
        }
    }
}
