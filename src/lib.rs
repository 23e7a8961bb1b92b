//! Airlock controller library.
//!
//! Pressure-cycling logic for named airlock zones, written against the
//! port traits in [`app::ports`].  The `airlock-sim` binary drives it
//! against the simulated grid in [`adapters::sim`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod airlock;
pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod fsm;
pub mod groups;
pub mod status;
