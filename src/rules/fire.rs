//! Forest fire: burning cells clear, trees ignite from neighbors or
//! lightning, cleared ground regrows.
//!
//! The stochastic part is confined to a single uniform draw per cell,
//! handed in by the engine so the whole tick replays under one seed.

use std::collections::BTreeMap;

use crate::cell::{count_in_state, Cell};
use crate::error::ConfigError;
use crate::rules::{count, probability};

pub const EMPTY: i32 = 0;
pub const TREE: i32 = 1;
pub const BURNING: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireParams {
    /// A tree ignites deterministically once this many neighbors burn.
    pub neighbors_to_ignite: usize,
    /// Chance a tree ignites spontaneously (lightning).
    pub prob_tree_ignites: f64,
    /// Chance empty ground regrows a tree.
    pub prob_tree_created: f64,
}

impl FireParams {
    pub fn from_map(parameters: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        Ok(Self {
            neighbors_to_ignite: count(parameters, "neighborsToIgnite")?,
            prob_tree_ignites: probability(parameters, "probTreeIgnites")?,
            prob_tree_created: probability(parameters, "probTreeCreated")?,
        })
    }
}

/// Transition for one cell. `draw` is that cell's uniform sample in [0, 1)
/// for this tick.
pub fn next_state(
    params: &FireParams,
    cells: &[Cell],
    neighbors: &[usize],
    index: usize,
    draw: f64,
) -> i32 {
    match cells[index].state() {
        BURNING => EMPTY,
        TREE => {
            let burning = count_in_state(cells, neighbors, BURNING);
            if burning >= params.neighbors_to_ignite || draw < params.prob_tree_ignites {
                BURNING
            } else {
                TREE
            }
        }
        _ => {
            if draw < params.prob_tree_created {
                TREE
            } else {
                EMPTY
            }
        }
    }
}
