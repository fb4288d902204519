//! Generalized Conway life: survival and birth windows over live neighbors.
//!
//! Classic Conway is survival [2, 3] and birth [3, 3]; any other windows
//! are legal, which also covers variants like HighLife-style birth ranges.

use std::collections::BTreeMap;

use crate::cell::{count_in_state, Cell};
use crate::error::ConfigError;
use crate::rules::count;

pub const DEAD: i32 = 0;
pub const ALIVE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeParams {
    /// A live cell survives when its live-neighbor count lies in
    /// [aliveToAliveMin, aliveToAliveMax].
    pub alive_to_alive_min: usize,
    pub alive_to_alive_max: usize,
    /// A dead cell is born when its live-neighbor count lies in
    /// [deadToAliveMin, deadToAliveMax].
    pub dead_to_alive_min: usize,
    pub dead_to_alive_max: usize,
}

impl LifeParams {
    pub fn from_map(parameters: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        let params = Self {
            alive_to_alive_min: count(parameters, "aliveToAliveMin")?,
            alive_to_alive_max: count(parameters, "aliveToAliveMax")?,
            dead_to_alive_min: count(parameters, "deadToAliveMin")?,
            dead_to_alive_max: count(parameters, "deadToAliveMax")?,
        };
        if params.alive_to_alive_min > params.alive_to_alive_max {
            return Err(ConfigError::InvalidParameter {
                name: "aliveToAliveMin",
                value: params.alive_to_alive_min as f64,
                expected: "no more than aliveToAliveMax",
            });
        }
        if params.dead_to_alive_min > params.dead_to_alive_max {
            return Err(ConfigError::InvalidParameter {
                name: "deadToAliveMin",
                value: params.dead_to_alive_min as f64,
                expected: "no more than deadToAliveMax",
            });
        }
        Ok(params)
    }
}

/// Transition for one cell, read entirely from the committed snapshot.
pub fn next_state(params: &LifeParams, cells: &[Cell], neighbors: &[usize], index: usize) -> i32 {
    let live = count_in_state(cells, neighbors, ALIVE);
    let window = match cells[index].state() {
        ALIVE => params.alive_to_alive_min..=params.alive_to_alive_max,
        _ => params.dead_to_alive_min..=params.dead_to_alive_max,
    };
    if window.contains(&live) {
        ALIVE
    } else {
        DEAD
    }
}
