//! The fully-parsed configuration payload consumed by the engine.
//!
//! Collaborators hand this struct over complete; the engine itself performs
//! no file IO. The JSON wire format keeps the scenario vocabulary: camelCase
//! field names, rule names like `"GameOfLife"`, and rule parameters keyed by
//! their scenario names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::CellShape;
use crate::grid::Topology;
use crate::neighborhood::Neighborhood;
use crate::rules::RuleKind;

/// Everything needed to build a [`Simulation`](crate::simulation::Simulation).
///
/// A JSON payload reads:
///
/// ```json
/// {
///   "width": 3, "height": 3,
///   "topology": "bounded",
///   "shape": "square",
///   "neighborhood": "adjacent",
///   "rule": "GameOfLife",
///   "parameters": {
///     "aliveToAliveMin": 2, "aliveToAliveMax": 3,
///     "deadToAliveMin": 3, "deadToAliveMax": 3
///   },
///   "initialStates": [0, 0, 0, 1, 1, 1, 0, 0, 0],
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSpec {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub shape: CellShape,
    #[serde(default)]
    pub neighborhood: Neighborhood,
    pub rule: RuleKind,
    /// Rule parameters by scenario name (thresholds, probabilities, ages).
    /// Missing required entries fail at construction; extra entries are
    /// ignored.
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    /// Row-major initial states, exactly `width * height` entries.
    pub initial_states: Vec<i32>,
    /// Seed for the engine's deterministic rng. Two runs from the same
    /// spec replay identically.
    #[serde(default)]
    pub seed: u64,
}

impl SimulationSpec {
    /// Parse a JSON payload.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Structural checks: nonzero dimensions, state list length, and every
    /// state inside the rule's domain. Parameter values are checked when
    /// the rule itself is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.width * self.height;
        if self.initial_states.len() != expected {
            return Err(ConfigError::StateCountMismatch {
                expected,
                actual: self.initial_states.len(),
            });
        }
        for (index, &state) in self.initial_states.iter().enumerate() {
            if !self.rule.valid_state(state) {
                return Err(ConfigError::InvalidState { index, state });
            }
        }
        Ok(())
    }
}
