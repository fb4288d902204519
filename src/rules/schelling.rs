//! Schelling segregation: agents that dislike their surroundings move.
//!
//! State 0 is an empty lot; every positive state is a group id, with no
//! upper bound on how many groups a scenario mixes. Relocation is the one
//! rule here that needs whole-grid planning: two unsatisfied agents must
//! not pick the same vacancy.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cell::Cell;
use crate::error::ConfigError;
use crate::rules::probability;

pub const EMPTY: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchellingParams {
    /// Minimum share of same-group agents among occupied neighbors.
    pub proportion_needed_to_stay: f64,
}

impl SchellingParams {
    pub fn from_map(parameters: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        Ok(Self {
            proportion_needed_to_stay: probability(parameters, "proportionNeededToStay")?,
        })
    }
}

/// Satisfaction over the committed snapshot. Empty neighbors are ignored;
/// an agent with no occupied neighbors at all is satisfied.
pub fn is_satisfied(
    params: &SchellingParams,
    cells: &[Cell],
    neighbors: &[usize],
    index: usize,
) -> bool {
    let group = cells[index].state();
    let mut occupied = 0usize;
    let mut same = 0usize;
    for &neighbor in neighbors {
        let state = cells[neighbor].state();
        if state != EMPTY {
            occupied += 1;
            if state == group {
                same += 1;
            }
        }
    }
    occupied == 0 || same as f64 / occupied as f64 >= params.proportion_needed_to_stay
}

/// Plan one generation. Satisfaction is judged for every agent against the
/// snapshot, then unsatisfied agents are processed in row-major order, each
/// drawing a destination uniformly from the vacancy pool. The pool holds
/// cells that were empty in the snapshot and unclaimed this tick; cells
/// vacated by this tick's movers do not rejoin it. When the pool runs dry
/// the remaining unsatisfied agents stay put.
pub fn plan(
    params: &SchellingParams,
    cells: &[Cell],
    cache: &[Vec<usize>],
    rng: &mut ChaCha8Rng,
) -> Vec<i32> {
    let mut next: Vec<i32> = cells.iter().map(|cell| cell.state()).collect();
    let mut pool: Vec<usize> = (0..cells.len())
        .filter(|&index| cells[index].state() == EMPTY)
        .collect();
    for index in 0..cells.len() {
        if cells[index].state() == EMPTY || is_satisfied(params, cells, &cache[index], index) {
            continue;
        }
        if pool.is_empty() {
            break;
        }
        let slot = rng.gen_range(0..pool.len());
        let target = pool.swap_remove(slot);
        next[target] = cells[index].state();
        next[index] = EMPTY;
    }
    next
}
