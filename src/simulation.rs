//! The engine proper: grid, rule, rng and the two-phase tick.
//!
//! Every tick runs the same protocol regardless of rule. Phase one reads
//! the committed generation and stages a next state for every cell without
//! mutating anything visible; phase two verifies coverage and commits the
//! whole generation at once. A tick that fails leaves the grid exactly at
//! the last committed generation.

use std::collections::BTreeMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::cell::{Cell, Payload};
use crate::config::SimulationSpec;
use crate::error::{ConfigError, Result, SimError};
use crate::geometry::{centroid, CellShape, Point};
use crate::grid::Grid;
use crate::rules::{fire, life, percolation, schelling, wator, Rule};

/// Below this cell count the evaluate phase stays sequential; fan-out
/// overhead beats the win on small boards.
const PARALLEL_THRESHOLD: usize = 1000;

/// One cell as handed to a frontend: committed state plus render geometry
/// in abstract grid units.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub state: i32,
    /// Centroid of `vertices`.
    pub location: Point,
    pub vertices: Vec<Point>,
}

/// A running automaton. Construction consumes a validated
/// [`SimulationSpec`]; afterwards the engine owns all state, including the
/// seeded rng that makes runs replayable.
pub struct Simulation {
    grid: Grid,
    shape: CellShape,
    /// Per-cell neighbor indices, resolved once at construction.
    neighbors: Vec<Vec<usize>>,
    rule: Rule,
    parameters: BTreeMap<String, f64>,
    rng: ChaCha8Rng,
    seed: u64,
    ticks: u64,
}

impl Simulation {
    pub fn new(spec: &SimulationSpec) -> Result<Self, ConfigError> {
        spec.validate()?;
        let rule = Rule::from_parameters(spec.rule, &spec.parameters)?;
        let mut grid = Grid::new(spec.width, spec.height, spec.topology)?;
        grid.load_states(&spec.initial_states)?;
        let neighbors = spec.neighborhood.build_cache(&grid);
        let mut sim = Self {
            grid,
            shape: spec.shape,
            neighbors,
            rule,
            parameters: spec.parameters.clone(),
            rng: ChaCha8Rng::seed_from_u64(spec.seed),
            seed: spec.seed,
            ticks: 0,
        };
        sim.init_payloads();
        debug!(
            rule = ?sim.rule.kind(),
            width = sim.grid.width(),
            height = sim.grid.height(),
            topology = ?sim.grid.topology(),
            seed = sim.seed,
            "simulation ready"
        );
        Ok(sim)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Generations committed since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.parameters
    }

    /// Committed states in row-major order.
    pub fn states(&self) -> Vec<i32> {
        self.grid.states()
    }

    pub fn count_in_state(&self, state: i32) -> usize {
        self.grid.iter().filter(|cell| cell.state() == state).count()
    }

    /// Advance one generation.
    ///
    /// On error nothing is committed: the grid still shows the previous
    /// generation and `ticks` is unchanged.
    pub fn tick(&mut self) -> Result<()> {
        match self.rule {
            Rule::GameOfLife(params) => {
                let staged = self.deterministic_pass(move |cells, neighbors, index| {
                    life::next_state(&params, cells, neighbors, index)
                });
                self.stage_states(&staged);
            }
            Rule::Percolation(params) => {
                let staged = self.deterministic_pass(move |cells, neighbors, index| {
                    percolation::next_state(&params, cells, neighbors, index)
                });
                self.stage_states(&staged);
            }
            Rule::Fire(params) => {
                // One uniform draw per cell, in row-major order, pulled
                // before the pass so the parallel path stays pure.
                let draws: Vec<f64> = (0..self.grid.len()).map(|_| self.rng.gen()).collect();
                let staged = self.deterministic_pass(move |cells, neighbors, index| {
                    fire::next_state(&params, cells, neighbors, index, draws[index])
                });
                self.stage_states(&staged);
            }
            Rule::Schelling(params) => {
                let staged =
                    schelling::plan(&params, self.grid.cells(), &self.neighbors, &mut self.rng);
                self.stage_states(&staged);
            }
            Rule::Wator(params) => {
                let staged =
                    wator::plan(&params, self.grid.cells(), &self.neighbors, &mut self.rng)?;
                self.stage_with_payloads(&staged);
            }
        }
        self.commit_staged()
    }

    /// Advance `ticks` generations, stopping at the first failure.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Reload states, reseed the rng and zero the tick counter. The new
    /// board must fit the existing grid and rule domain.
    pub fn reset(&mut self, states: &[i32]) -> Result<(), ConfigError> {
        if states.len() != self.grid.len() {
            return Err(ConfigError::StateCountMismatch {
                expected: self.grid.len(),
                actual: states.len(),
            });
        }
        for (index, &state) in states.iter().enumerate() {
            if !self.rule.kind().valid_state(state) {
                return Err(ConfigError::InvalidState { index, state });
            }
        }
        self.grid.load_states(states)?;
        self.init_payloads();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.ticks = 0;
        debug!(seed = self.seed, "simulation reset");
        Ok(())
    }

    /// Render-ready view of the committed generation, row-major.
    pub fn snapshot(&self) -> impl Iterator<Item = CellView> + '_ {
        let shape = self.shape;
        (0..self.grid.len()).map(move |index| {
            let (row, col) = self.grid.row_col(index);
            let vertices = shape.vertices(row, col);
            CellView {
                state: self.grid.cells()[index].state(),
                location: centroid(&vertices),
                vertices,
            }
        })
    }

    /// Evaluate a pure per-cell transition over the committed snapshot,
    /// in parallel once the grid is large enough to pay for it.
    fn deterministic_pass<F>(&self, transition: F) -> Vec<i32>
    where
        F: Fn(&[Cell], &[usize], usize) -> i32 + Sync + Send,
    {
        let cells = self.grid.cells();
        if cells.len() >= PARALLEL_THRESHOLD {
            (0..cells.len())
                .into_par_iter()
                .map(|index| transition(cells, &self.neighbors[index], index))
                .collect()
        } else {
            (0..cells.len())
                .map(|index| transition(cells, &self.neighbors[index], index))
                .collect()
        }
    }

    fn stage_states(&mut self, staged: &[i32]) {
        for (cell, &state) in self.grid.cells_mut().iter_mut().zip(staged) {
            cell.set_next(state);
        }
    }

    fn stage_with_payloads(&mut self, staged: &[(i32, Payload)]) {
        for (cell, &(state, payload)) in self.grid.cells_mut().iter_mut().zip(staged) {
            cell.set_next_with(state, payload);
        }
    }

    /// Phase two: all-or-nothing. A cell without a staged state aborts the
    /// tick and discards every pending value.
    fn commit_staged(&mut self) -> Result<()> {
        if let Some(index) = self.grid.first_uncomputed() {
            self.grid.clear_pending();
            return Err(SimError::UncomputedCell { index });
        }
        self.grid.commit_all();
        self.ticks += 1;
        trace!(tick = self.ticks, "generation committed");
        Ok(())
    }

    /// Wa-Tor creatures carry age/energy; everything else carries nothing.
    fn init_payloads(&mut self) {
        if let Rule::Wator(params) = self.rule {
            for cell in self.grid.cells_mut() {
                let state = cell.state();
                let payload = match state {
                    wator::FISH => Payload::Wator { age: 0, energy: 0 },
                    wator::SHARK => Payload::Wator {
                        age: 0,
                        energy: params.initial_energy,
                    },
                    _ => Payload::None,
                };
                cell.overwrite(state, payload);
            }
        }
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                if col > 0 {
                    write!(f, " ")?;
                }
                let cell = self.grid.get(row, col).ok_or(fmt::Error)?;
                write!(f, "{}", cell.state())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
