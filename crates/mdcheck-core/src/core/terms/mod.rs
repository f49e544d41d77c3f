//! # Term Maps
//!
//! Every energy label an engine reports must be reconciled into the canonical
//! vocabulary before two engines can be compared. This module owns that mapping
//! as data rather than as per-engine branching.
//!
//! - [`map`] - The validated, immutable [`map::CanonicalTermMap`] and its TOML loader
//! - [`presets`] - Built-in label tables for OpenMM, Amber (sander), CHARMM and Gromacs
//! - [`solvent`] - Amber `igb` code to implicit-solvent model lookup

pub mod map;
pub mod presets;
pub mod solvent;
