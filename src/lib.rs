//! Ink Duel: a fixed-timestep, two-combatant fighting simulation.
//!
//! The simulation core is `compute::advance_tick` over a `MatchState`. The
//! remaining modules are its stages and data. `progress` is a small helper for
//! hosts that persist cleared difficulties, and `telemetry` sets up file logging.

pub mod ai;
pub mod combat;
pub mod commands;
pub mod compute;
pub mod config;
pub mod effects;
pub mod entities;
pub mod moves;
pub mod physics;
pub mod progress;
pub mod state_machine;
pub mod telemetry;
