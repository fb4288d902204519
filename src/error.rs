//! Error types shared across the engine.

use thiserror::Error;

/// Rejected configuration payloads.
///
/// Raised when a simulation is built or reset, never mid-tick: a grid that
/// starts ticking has already passed every structural check.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid dimensions must be nonzero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },

    #[error("initial state list holds {actual} entries, grid needs {expected}")]
    StateCountMismatch { expected: usize, actual: usize },

    #[error("state {state} at index {index} is outside the rule's domain")]
    InvalidState { index: usize, state: i32 },

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("parameter {name} = {value} is out of range (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Mid-tick invariant violations.
///
/// Fatal for the tick that raised them; the grid is left at the last
/// committed generation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("cell {index} reached commit without a computed next state")]
    UncomputedCell { index: usize },

    #[error("occupied cell {index} is missing its age/energy payload")]
    MissingPayload { index: usize },
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
