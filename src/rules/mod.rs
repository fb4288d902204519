//! The five update rules and their parameter tables.
//!
//! Every rule exposes the same two hooks: a pure `valid_state` domain check
//! used while loading scenarios, and a transition function consulted once
//! per cell per tick. The pure rules (life, percolation, fire) compute each
//! cell independently from the committed snapshot; the agent rules
//! (schelling, wator) plan a whole generation at once because movers
//! compete for destination cells.

pub mod fire;
pub mod life;
pub mod percolation;
pub mod schelling;
pub mod wator;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which rule a scenario runs, before parameters are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    GameOfLife,
    Percolation,
    Fire,
    Schelling,
    Wator,
}

impl RuleKind {
    /// Whether `state` belongs to this rule's domain. Schelling is open
    /// ended upward: any nonnegative state is a group id (0 is empty).
    pub fn valid_state(self, state: i32) -> bool {
        match self {
            RuleKind::GameOfLife => matches!(state, life::DEAD | life::ALIVE),
            RuleKind::Percolation => matches!(
                state,
                percolation::OPEN | percolation::PERCOLATED | percolation::BLOCKED
            ),
            RuleKind::Fire => matches!(state, fire::EMPTY | fire::TREE | fire::BURNING),
            RuleKind::Schelling => state >= schelling::EMPTY,
            RuleKind::Wator => matches!(state, wator::EMPTY | wator::FISH | wator::SHARK),
        }
    }
}

/// A rule with its parameters resolved and range-checked.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    GameOfLife(life::LifeParams),
    Percolation(percolation::PercolationParams),
    Fire(fire::FireParams),
    Schelling(schelling::SchellingParams),
    Wator(wator::WatorParams),
}

impl Rule {
    /// Resolve `parameters` against the table `kind` requires. Unknown
    /// entries are ignored; missing or out-of-range ones are rejected.
    pub fn from_parameters(
        kind: RuleKind,
        parameters: &BTreeMap<String, f64>,
    ) -> Result<Self, ConfigError> {
        Ok(match kind {
            RuleKind::GameOfLife => Rule::GameOfLife(life::LifeParams::from_map(parameters)?),
            RuleKind::Percolation => {
                Rule::Percolation(percolation::PercolationParams::from_map(parameters)?)
            }
            RuleKind::Fire => Rule::Fire(fire::FireParams::from_map(parameters)?),
            RuleKind::Schelling => {
                Rule::Schelling(schelling::SchellingParams::from_map(parameters)?)
            }
            RuleKind::Wator => Rule::Wator(wator::WatorParams::from_map(parameters)?),
        })
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::GameOfLife(_) => RuleKind::GameOfLife,
            Rule::Percolation(_) => RuleKind::Percolation,
            Rule::Fire(_) => RuleKind::Fire,
            Rule::Schelling(_) => RuleKind::Schelling,
            Rule::Wator(_) => RuleKind::Wator,
        }
    }
}

/// Fetch a required parameter by its scenario name.
pub(crate) fn require(
    parameters: &BTreeMap<String, f64>,
    name: &'static str,
) -> Result<f64, ConfigError> {
    parameters
        .get(name)
        .copied()
        .ok_or(ConfigError::MissingParameter(name))
}

/// A required parameter constrained to [0, 1].
pub(crate) fn probability(
    parameters: &BTreeMap<String, f64>,
    name: &'static str,
) -> Result<f64, ConfigError> {
    let value = require(parameters, name)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            expected: "a value in [0, 1]",
        });
    }
    Ok(value)
}

/// A required parameter constrained to a whole, nonnegative count.
/// Rejects fractional values rather than rounding them; NaN and infinity
/// fail the same check.
pub(crate) fn count(
    parameters: &BTreeMap<String, f64>,
    name: &'static str,
) -> Result<usize, ConfigError> {
    let value = require(parameters, name)?;
    if value.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&value) {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            expected: "a whole count in [0, 2^32)",
        });
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_missing_parameter_names_the_key() {
        let result = Rule::from_parameters(RuleKind::Percolation, &BTreeMap::new());
        assert!(matches!(
            result,
            Err(ConfigError::MissingParameter("percolatedNeighbors"))
        ));
    }

    #[test]
    fn test_probability_rejects_out_of_range() {
        let result = probability(&params(&[("p", 1.5)]), "p");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "p", .. })
        ));
    }

    #[test]
    fn test_count_rejects_fractional_and_nan() {
        assert!(count(&params(&[("n", 2.5)]), "n").is_err());
        assert!(count(&params(&[("n", -1.0)]), "n").is_err());
        assert!(count(&params(&[("n", f64::NAN)]), "n").is_err());
        assert!(count(&params(&[("n", f64::INFINITY)]), "n").is_err());
        assert_eq!(count(&params(&[("n", 3.0)]), "n").unwrap(), 3);
    }

    #[test]
    fn test_extra_parameters_are_ignored() {
        let rule = Rule::from_parameters(
            RuleKind::Percolation,
            &params(&[("percolatedNeighbors", 1.0), ("unused", 9.0)]),
        )
        .unwrap();
        assert_eq!(rule.kind(), RuleKind::Percolation);
    }

    #[test]
    fn test_wire_names_are_pascal_case() {
        let json = serde_json::to_string(&RuleKind::GameOfLife).unwrap();
        assert_eq!(json, "\"GameOfLife\"");
        let kind: RuleKind = serde_json::from_str("\"Wator\"").unwrap();
        assert_eq!(kind, RuleKind::Wator);
    }

    #[test]
    fn test_schelling_domain_is_open_ended() {
        assert!(RuleKind::Schelling.valid_state(0));
        assert!(RuleKind::Schelling.valid_state(7));
        assert!(!RuleKind::Schelling.valid_state(-1));
        assert!(!RuleKind::GameOfLife.valid_state(2));
    }
}
