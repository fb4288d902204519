//! Site percolation: open cells flood once enough neighbors have.
//!
//! Monotone by construction: percolated and blocked cells never change,
//! so every run reaches a fixed point.

use std::collections::BTreeMap;

use crate::cell::{count_in_state, Cell};
use crate::error::ConfigError;
use crate::rules::count;

pub const OPEN: i32 = 0;
pub const PERCOLATED: i32 = 1;
pub const BLOCKED: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercolationParams {
    /// An open cell percolates once at least this many neighbors have.
    pub percolated_neighbors: usize,
}

impl PercolationParams {
    pub fn from_map(parameters: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        Ok(Self {
            percolated_neighbors: count(parameters, "percolatedNeighbors")?,
        })
    }
}

pub fn next_state(
    params: &PercolationParams,
    cells: &[Cell],
    neighbors: &[usize],
    index: usize,
) -> i32 {
    let state = cells[index].state();
    if state == OPEN && count_in_state(cells, neighbors, PERCOLATED) >= params.percolated_neighbors
    {
        PERCOLATED
    } else {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(states: &[i32]) -> Vec<Cell> {
        states.iter().map(|&s| Cell::new(s)).collect()
    }

    #[test]
    fn test_open_cell_floods_at_threshold() {
        let params = PercolationParams {
            percolated_neighbors: 2,
        };
        let snapshot = cells(&[OPEN, PERCOLATED, PERCOLATED, OPEN]);
        assert_eq!(next_state(&params, &snapshot, &[1, 2, 3], 0), PERCOLATED);
        assert_eq!(next_state(&params, &snapshot, &[1, 3], 0), OPEN);
    }

    #[test]
    fn test_blocked_cell_never_floods() {
        let params = PercolationParams {
            percolated_neighbors: 1,
        };
        let snapshot = cells(&[BLOCKED, PERCOLATED, PERCOLATED]);
        assert_eq!(next_state(&params, &snapshot, &[1, 2], 0), BLOCKED);
    }

    #[test]
    fn test_percolated_cell_stays_percolated() {
        let params = PercolationParams {
            percolated_neighbors: 4,
        };
        let snapshot = cells(&[PERCOLATED, OPEN]);
        assert_eq!(next_state(&params, &snapshot, &[1], 0), PERCOLATED);
    }

    #[test]
    fn test_zero_threshold_floods_everything_open() {
        let params = PercolationParams {
            percolated_neighbors: 0,
        };
        let snapshot = cells(&[OPEN, BLOCKED]);
        assert_eq!(next_state(&params, &snapshot, &[1], 0), PERCOLATED);
        assert_eq!(next_state(&params, &snapshot, &[0], 1), BLOCKED);
    }
}
