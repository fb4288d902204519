//! Wa-Tor predator-prey: fish graze, sharks hunt, both reproduce by age.
//!
//! Each creature carries an age and (for sharks) an energy reserve in its
//! cell payload. Creatures act once per tick in row-major order; claims on
//! destination cells resolve conflicts, so a fish that moved first cannot
//! be eaten later the same tick, and a fish already eaten never acts.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cell::{Cell, Payload};
use crate::error::{ConfigError, Result, SimError};
use crate::rules::count;

pub const EMPTY: i32 = 0;
pub const FISH: i32 = 1;
pub const SHARK: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatorParams {
    /// A fish spawns when it moves at this age or older.
    pub fish_age_of_reproduction: u32,
    /// A shark spawns when it moves at this age or older.
    pub shark_age_of_reproduction: u32,
    /// Energy granted to newborn and initial sharks.
    pub initial_energy: u32,
    /// Energy gained by eating a fish (on top of the per-tick cost of 1).
    pub energy_boost: u32,
}

impl WatorParams {
    pub fn from_map(parameters: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        let params = Self {
            fish_age_of_reproduction: count(parameters, "fishAgeOfReproduction")? as u32,
            shark_age_of_reproduction: count(parameters, "sharkAgeOfReproduction")? as u32,
            initial_energy: count(parameters, "initialEnergy")? as u32,
            energy_boost: count(parameters, "energyBoost")? as u32,
        };
        if params.fish_age_of_reproduction == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "fishAgeOfReproduction",
                value: 0.0,
                expected: "at least 1",
            });
        }
        if params.shark_age_of_reproduction == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "sharkAgeOfReproduction",
                value: 0.0,
                expected: "at least 1",
            });
        }
        Ok(params)
    }
}

fn creature(cells: &[Cell], index: usize) -> Result<(u32, u32)> {
    match cells[index].payload() {
        Payload::Wator { age, energy } => Ok((age, energy)),
        Payload::None => Err(SimError::MissingPayload { index }),
    }
}

/// Uniform draw over the neighbors that pass `keep`, or None.
fn pick<F>(neighbors: &[usize], rng: &mut ChaCha8Rng, keep: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    let candidates: Vec<usize> = neighbors.iter().copied().filter(|&n| keep(n)).collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}

/// Plan one generation of moves, meals, births and deaths.
///
/// Creatures are scanned in row-major order over the committed snapshot.
/// `claimed` marks cells whose next content is already spoken for: movers
/// claim their destination and their vacated source, sharks claim the fish
/// they eat. A claimed fish is dead when the scan reaches it and is
/// skipped. Sharks act on their own cell, which nothing else ever targets.
pub fn plan(
    params: &WatorParams,
    cells: &[Cell],
    cache: &[Vec<usize>],
    rng: &mut ChaCha8Rng,
) -> Result<Vec<(i32, Payload)>> {
    let mut next: Vec<(i32, Payload)> = cells
        .iter()
        .map(|cell| (cell.state(), cell.payload()))
        .collect();
    let mut claimed = vec![false; cells.len()];

    for index in 0..cells.len() {
        match cells[index].state() {
            FISH => {
                if claimed[index] {
                    continue;
                }
                let (age, _) = creature(cells, index)?;
                let age = age + 1;
                let dest = pick(&cache[index], rng, |n| {
                    cells[n].state() == EMPTY && !claimed[n]
                });
                match dest {
                    Some(dest) => {
                        claimed[dest] = true;
                        claimed[index] = true;
                        if age >= params.fish_age_of_reproduction {
                            next[index] = (FISH, Payload::Wator { age: 0, energy: 0 });
                            next[dest] = (FISH, Payload::Wator { age: 0, energy: 0 });
                        } else {
                            next[index] = (EMPTY, Payload::None);
                            next[dest] = (FISH, Payload::Wator { age, energy: 0 });
                        }
                    }
                    None => {
                        next[index] = (FISH, Payload::Wator { age, energy: 0 });
                        claimed[index] = true;
                    }
                }
            }
            SHARK => {
                let (age, energy) = creature(cells, index)?;
                if energy == 0 {
                    next[index] = (EMPTY, Payload::None);
                    claimed[index] = true;
                    continue;
                }
                let age = age + 1;
                let meal = pick(&cache[index], rng, |n| {
                    cells[n].state() == FISH && !claimed[n]
                });
                let (dest, energy_after) = match meal {
                    Some(dest) => (Some(dest), energy - 1 + params.energy_boost),
                    None => (
                        pick(&cache[index], rng, |n| {
                            cells[n].state() == EMPTY && !claimed[n]
                        }),
                        energy - 1,
                    ),
                };
                match dest {
                    Some(dest) => {
                        claimed[dest] = true;
                        claimed[index] = true;
                        if age >= params.shark_age_of_reproduction {
                            next[index] = (
                                SHARK,
                                Payload::Wator {
                                    age: 0,
                                    energy: params.initial_energy,
                                },
                            );
                            next[dest] = (
                                SHARK,
                                Payload::Wator {
                                    age: 0,
                                    energy: energy_after,
                                },
                            );
                        } else {
                            next[index] = (EMPTY, Payload::None);
                            next[dest] = (
                                SHARK,
                                Payload::Wator {
                                    age,
                                    energy: energy_after,
                                },
                            );
                        }
                    }
                    None => {
                        next[index] = (
                            SHARK,
                            Payload::Wator {
                                age,
                                energy: energy_after,
                            },
                        );
                        claimed[index] = true;
                    }
                }
            }
            _ => {}
        }
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn params() -> WatorParams {
        WatorParams {
            fish_age_of_reproduction: 100,
            shark_age_of_reproduction: 100,
            initial_energy: 5,
            energy_boost: 3,
        }
    }

    fn occupant(state: i32, age: u32, energy: u32) -> Cell {
        let mut cell = Cell::default();
        cell.overwrite(state, Payload::Wator { age, energy });
        cell
    }

    fn water() -> Cell {
        Cell::default()
    }

    fn line_cache(len: usize) -> Vec<Vec<usize>> {
        (0..len)
            .map(|i| {
                let mut out = Vec::new();
                if i > 0 {
                    out.push(i - 1);
                }
                if i + 1 < len {
                    out.push(i + 1);
                }
                out
            })
            .collect()
    }

    #[test]
    fn test_starved_shark_dies_before_acting() {
        let cells = vec![occupant(SHARK, 4, 0), occupant(FISH, 0, 0)];
        let cache = line_cache(2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let next = plan(&params(), &cells, &cache, &mut rng).unwrap();
        assert_eq!(next[0], (EMPTY, Payload::None));
        // The fish survives: the dead shark never hunted.
        assert!(next.iter().any(|&(state, _)| state == FISH));
    }

    #[test]
    fn test_shark_eats_adjacent_fish_and_banks_energy() {
        // Shark scans first, fish is its only neighbor: the meal draw has
        // a single candidate.
        let cells = vec![occupant(SHARK, 0, 2), occupant(FISH, 0, 0)];
        let cache = line_cache(2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let next = plan(&params(), &cells, &cache, &mut rng).unwrap();
        assert_eq!(next[0], (EMPTY, Payload::None));
        assert_eq!(
            next[1],
            (SHARK, Payload::Wator { age: 1, energy: 4 }) // 2 - 1 + 3
        );
    }

    #[test]
    fn test_eaten_fish_loses_its_turn() {
        // Shark at 0 eats the fish at 1; the fish must not then move into
        // the open water at 2.
        let cells = vec![occupant(SHARK, 0, 2), occupant(FISH, 0, 0), water()];
        let cache = line_cache(3);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let next = plan(&params(), &cells, &cache, &mut rng).unwrap();
        assert_eq!(next[1].0, SHARK);
        assert_eq!(next[2], (EMPTY, Payload::None));
    }

    #[test]
    fn test_boxed_in_fish_stays_and_ages() {
        let cells = vec![occupant(FISH, 2, 0), occupant(FISH, 7, 0)];
        let cache = line_cache(2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let next = plan(&params(), &cells, &cache, &mut rng).unwrap();
        assert_eq!(next[0], (FISH, Payload::Wator { age: 3, energy: 0 }));
        assert_eq!(next[1], (FISH, Payload::Wator { age: 8, energy: 0 }));
    }

    #[test]
    fn test_fish_at_reproduction_age_spawns_on_move() {
        let spawning = WatorParams {
            fish_age_of_reproduction: 2,
            ..params()
        };
        let cells = vec![occupant(FISH, 1, 0), water()];
        let cache = line_cache(2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let next = plan(&spawning, &cells, &cache, &mut rng).unwrap();
        // Mover reaches age 2 on this tick: offspring at the source, both
        // reset to age 0.
        assert_eq!(next[0], (FISH, Payload::Wator { age: 0, energy: 0 }));
        assert_eq!(next[1], (FISH, Payload::Wator { age: 0, energy: 0 }));
    }

    #[test]
    fn test_shark_reproduction_grants_initial_energy() {
        let spawning = WatorParams {
            shark_age_of_reproduction: 1,
            ..params()
        };
        let cells = vec![occupant(SHARK, 0, 4), water()];
        let cache = line_cache(2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let next = plan(&spawning, &cells, &cache, &mut rng).unwrap();
        assert_eq!(next[0], (SHARK, Payload::Wator { age: 0, energy: 5 }));
        assert_eq!(next[1], (SHARK, Payload::Wator { age: 0, energy: 3 }));
    }

    #[test]
    fn test_missing_payload_is_an_error() {
        let cells = vec![Cell::new(FISH)];
        let cache = line_cache(1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(matches!(
            plan(&params(), &cells, &cache, &mut rng),
            Err(SimError::MissingPayload { index: 0 })
        ));
    }

    #[test]
    fn test_zero_reproduction_age_is_rejected() {
        let parameters: BTreeMap<String, f64> = [
            ("fishAgeOfReproduction", 0.0),
            ("sharkAgeOfReproduction", 5.0),
            ("initialEnergy", 5.0),
            ("energyBoost", 2.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert!(matches!(
            WatorParams::from_map(&parameters),
            Err(ConfigError::InvalidParameter {
                name: "fishAgeOfReproduction",
                ..
            })
        ));
    }
}
