//! Cellarium - Discrete Cellular Automaton Engine

pub mod cell;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod neighborhood;
pub mod rules;
pub mod simulation;
